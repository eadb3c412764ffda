//! Create the ground_truths table.

use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_papers_table::Papers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroundTruths::Table)
                    .if_not_exists()
                    .col(pk_auto(GroundTruths::Id))
                    .col(integer_uniq(GroundTruths::PaperId))
                    .col(text(GroundTruths::Title))
                    .col(string_len_null(GroundTruths::Doi, 255))
                    .col(json_binary_null(GroundTruths::Authors))
                    .col(json_binary_null(GroundTruths::Refs))
                    .col(json_binary_null(GroundTruths::Xrefs))
                    .col(text_null(GroundTruths::Abstract))
                    .col(ColumnDef::new(GroundTruths::Keywords).array(ColumnType::Text).null())
                    .col(text_null(GroundTruths::Description))
                    .col(
                        timestamp_with_time_zone(GroundTruths::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(GroundTruths::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ground_truths_paper_id")
                            .from(GroundTruths::Table, GroundTruths::PaperId)
                            .to(Papers::Table, Papers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ground_truths_doi")
                    .table(GroundTruths::Table)
                    .col(GroundTruths::Doi)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroundTruths::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum GroundTruths {
    Table,
    Id,
    PaperId,
    Title,
    Doi,
    Authors,
    Refs,
    Xrefs,
    Abstract,
    Keywords,
    Description,
    CreatedAt,
    UpdatedAt,
}
