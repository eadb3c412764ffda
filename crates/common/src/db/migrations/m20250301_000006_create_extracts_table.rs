//! Create the extracts table.

use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_papers_table::Papers;
use super::m20250301_000004_create_extractors_table::Extractors;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Extracts::Table)
                    .if_not_exists()
                    .col(pk_auto(Extracts::Id))
                    .col(integer(Extracts::PaperId))
                    .col(integer(Extracts::ExtractorId))
                    .col(text_null(Extracts::Title))
                    .col(string_len_null(Extracts::Doi, 255))
                    .col(json_binary_null(Extracts::Authors))
                    .col(json_binary_null(Extracts::Refs))
                    .col(json_binary_null(Extracts::Xrefs))
                    .col(text_null(Extracts::Abstract))
                    .col(ColumnDef::new(Extracts::Keywords).array(ColumnType::Text).null())
                    .col(text_null(Extracts::RawOutput))
                    .col(string_len(Extracts::Status, 20).default("completed"))
                    .col(text_null(Extracts::ErrorMessage))
                    .col(double_null(Extracts::ProcessingTimeSeconds))
                    .col(timestamp_with_time_zone_null(Extracts::ExtractedAt))
                    .col(
                        timestamp_with_time_zone(Extracts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Extracts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extracts_paper_id")
                            .from(Extracts::Table, Extracts::PaperId)
                            .to(Papers::Table, Papers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extracts_extractor_id")
                            .from(Extracts::Table, Extracts::ExtractorId)
                            .to(Extractors::Table, Extractors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_extracts_paper_id", Extracts::PaperId),
            ("idx_extracts_extractor_id", Extracts::ExtractorId),
            ("idx_extracts_status", Extracts::Status),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Extracts::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Extracts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Extracts {
    Table,
    Id,
    PaperId,
    ExtractorId,
    Title,
    Doi,
    Authors,
    Refs,
    Xrefs,
    Abstract,
    Keywords,
    RawOutput,
    Status,
    ErrorMessage,
    ProcessingTimeSeconds,
    ExtractedAt,
    CreatedAt,
    UpdatedAt,
}
