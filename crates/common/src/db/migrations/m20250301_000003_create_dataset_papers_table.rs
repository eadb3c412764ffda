//! Create the dataset membership table.

use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_papers_table::Papers;
use super::m20250301_000002_create_datasets_table::Datasets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DatasetPapers::Table)
                    .if_not_exists()
                    .col(integer(DatasetPapers::DatasetId))
                    .col(integer(DatasetPapers::PaperId))
                    .primary_key(
                        Index::create()
                            .col(DatasetPapers::DatasetId)
                            .col(DatasetPapers::PaperId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dataset_papers_dataset_id")
                            .from(DatasetPapers::Table, DatasetPapers::DatasetId)
                            .to(Datasets::Table, Datasets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dataset_papers_paper_id")
                            .from(DatasetPapers::Table, DatasetPapers::PaperId)
                            .to(Papers::Table, Papers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookups: datasets containing a paper
        manager
            .create_index(
                Index::create()
                    .name("idx_dataset_papers_paper_id")
                    .table(DatasetPapers::Table)
                    .col(DatasetPapers::PaperId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DatasetPapers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DatasetPapers {
    Table,
    DatasetId,
    PaperId,
}
