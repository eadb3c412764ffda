//! Create the extract_evals table.

use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000004_create_extractors_table::Extractors;
use super::m20250301_000005_create_ground_truths_table::GroundTruths;
use super::m20250301_000006_create_extracts_table::Extracts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExtractEvals::Table)
                    .if_not_exists()
                    .col(pk_auto(ExtractEvals::Id))
                    .col(integer(ExtractEvals::ExtractId))
                    .col(integer(ExtractEvals::ExtractorId))
                    .col(integer(ExtractEvals::GroundTruthId))
                    .col(timestamp_with_time_zone_null(ExtractEvals::EvaluatedAt))
                    .col(boolean_null(ExtractEvals::TitleExactMatch))
                    .col(integer_null(ExtractEvals::TitleLevenshteinDistance))
                    .col(double_null(ExtractEvals::TitleSemanticSimilarity))
                    .col(double_null(ExtractEvals::TitleLengthRatio))
                    .col(boolean_null(ExtractEvals::DoiExactMatch))
                    .col(boolean_null(ExtractEvals::DoiIsValid))
                    .col(double_null(ExtractEvals::AbstractRougeL))
                    .col(double_null(ExtractEvals::AbstractBertScore))
                    .col(double_null(ExtractEvals::KeywordsJaccardIndex))
                    .col(double_null(ExtractEvals::KeywordsF1))
                    .col(double_null(ExtractEvals::KeywordsPrecision))
                    .col(double_null(ExtractEvals::KeywordsRecall))
                    .col(double_null(ExtractEvals::KeywordsAvgJaroWinkler))
                    .col(text_null(ExtractEvals::Notes))
                    .col(json_binary_null(ExtractEvals::EvaluationDetails))
                    .col(
                        timestamp_with_time_zone(ExtractEvals::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ExtractEvals::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extract_evals_extract_id")
                            .from(ExtractEvals::Table, ExtractEvals::ExtractId)
                            .to(Extracts::Table, Extracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extract_evals_extractor_id")
                            .from(ExtractEvals::Table, ExtractEvals::ExtractorId)
                            .to(Extractors::Table, Extractors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extract_evals_ground_truth_id")
                            .from(ExtractEvals::Table, ExtractEvals::GroundTruthId)
                            .to(GroundTruths::Table, GroundTruths::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_extract_evals_extract_id", ExtractEvals::ExtractId),
            ("idx_extract_evals_extractor_id", ExtractEvals::ExtractorId),
            ("idx_extract_evals_ground_truth_id", ExtractEvals::GroundTruthId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(ExtractEvals::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExtractEvals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExtractEvals {
    Table,
    Id,
    ExtractId,
    ExtractorId,
    GroundTruthId,
    EvaluatedAt,
    TitleExactMatch,
    TitleLevenshteinDistance,
    TitleSemanticSimilarity,
    TitleLengthRatio,
    DoiExactMatch,
    DoiIsValid,
    AbstractRougeL,
    AbstractBertScore,
    KeywordsJaccardIndex,
    KeywordsF1,
    KeywordsPrecision,
    KeywordsRecall,
    KeywordsAvgJaroWinkler,
    Notes,
    EvaluationDetails,
    CreatedAt,
    UpdatedAt,
}
