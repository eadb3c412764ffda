//! Create the papers table.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Papers::Table)
                    .if_not_exists()
                    .col(pk_auto(Papers::Id))
                    .col(string_len_null(Papers::PdfPath, 500))
                    .col(string_len_null(Papers::PdfUrl, 500))
                    .col(string_len_null(Papers::PdfHash, 64).unique_key())
                    .col(integer(Papers::PdfActualStartPage).default(1))
                    .col(integer_null(Papers::PdfActualLastPage))
                    .col(string_len_null(Papers::Source, 255))
                    .col(
                        timestamp_with_time_zone(Papers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Papers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_papers_source")
                    .table(Papers::Table)
                    .col(Papers::Source)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Papers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Papers {
    Table,
    Id,
    PdfPath,
    PdfUrl,
    PdfHash,
    PdfActualStartPage,
    PdfActualLastPage,
    Source,
    CreatedAt,
    UpdatedAt,
}
