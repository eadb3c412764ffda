//! Create the extractors table.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Extractors::Table)
                    .if_not_exists()
                    .col(pk_auto(Extractors::Id))
                    .col(string_len(Extractors::ExtractorType, 20))
                    .col(string_len_null(Extractors::Version, 30))
                    .col(string_len_null(Extractors::Author, 50))
                    .col(string_len_null(Extractors::Variant, 50))
                    .col(date_null(Extractors::ReleaseDate))
                    .col(string_len_null(Extractors::ReleaseGitHash, 64))
                    .col(text_null(Extractors::Description))
                    .col(string_len_null(Extractors::ParserName, 100))
                    .col(string_len_null(Extractors::ParserVersion, 50))
                    .col(string_len_null(Extractors::ParserGitHash, 64))
                    .col(json_binary_null(Extractors::ParserConfig))
                    .col(string_len_null(Extractors::ParserConfigHash, 64))
                    .col(json_binary_null(Extractors::ConfigSchema))
                    .col(string_len_null(Extractors::ConfigHash, 64))
                    .col(json_binary_null(Extractors::DefaultConfig))
                    .col(string_len_null(Extractors::DockerImage, 255))
                    .col(string_len_null(Extractors::DockerTag, 100))
                    .col(string_len_null(Extractors::DockerDigest, 100))
                    .col(string_len_null(Extractors::DevelopmentEndpoint, 255))
                    .col(boolean(Extractors::DevelopmentEndpointEnabled).default(false))
                    .col(string_len_null(Extractors::ProductionEndpoint, 255))
                    .col(boolean(Extractors::ProductionEndpointEnabled).default(false))
                    .col(boolean(Extractors::IsEnabled).default(true))
                    .col(
                        timestamp_with_time_zone(Extractors::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Extractors::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager.create_index(uniqueness_index()).await?;

        for (name, column) in [
            ("idx_extractors_extractor_type", Extractors::ExtractorType),
            ("idx_extractors_config_hash", Extractors::ConfigHash),
            ("idx_extractors_parser_config_hash", Extractors::ParserConfigHash),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Extractors::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Extractors::Table).to_owned())
            .await
    }
}

/// NULLS NOT DISTINCT: two rows that both leave a column NULL still collide
fn uniqueness_index() -> IndexCreateStatement {
    Index::create()
        .name("uq_extractor_version_variant_config")
        .table(Extractors::Table)
        .col(Extractors::ExtractorType)
        .col(Extractors::Version)
        .col(Extractors::Variant)
        .col(Extractors::ConfigHash)
        .col(Extractors::ParserConfigHash)
        .unique()
        .nulls_not_distinct()
        .to_owned()
}

#[derive(DeriveIden)]
pub(super) enum Extractors {
    Table,
    Id,
    ExtractorType,
    Version,
    Author,
    Variant,
    ReleaseDate,
    ReleaseGitHash,
    Description,
    ParserName,
    ParserVersion,
    ParserGitHash,
    ParserConfig,
    ParserConfigHash,
    ConfigSchema,
    ConfigHash,
    DefaultConfig,
    DockerImage,
    DockerTag,
    DockerDigest,
    DevelopmentEndpoint,
    DevelopmentEndpointEnabled,
    ProductionEndpoint,
    ProductionEndpointEnabled,
    IsEnabled,
    CreatedAt,
    UpdatedAt,
}
