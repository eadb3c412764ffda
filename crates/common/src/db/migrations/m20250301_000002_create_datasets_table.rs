//! Create the datasets table.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Datasets::Table)
                    .if_not_exists()
                    .col(pk_auto(Datasets::Id))
                    .col(string_len_uniq(Datasets::Name, 255))
                    .col(text_null(Datasets::Description))
                    .col(string_len_null(Datasets::Version, 50))
                    .col(string_len_null(Datasets::Source, 255))
                    .col(string_len_null(Datasets::License, 100))
                    .col(string_len_null(Datasets::FolderPath, 500))
                    .col(
                        timestamp_with_time_zone(Datasets::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Datasets::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Datasets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Datasets {
    Table,
    Id,
    Name,
    Description,
    Version,
    Source,
    License,
    FolderPath,
    CreatedAt,
    UpdatedAt,
}
