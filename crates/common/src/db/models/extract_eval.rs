//! Extract evaluation entity - scored comparison of an extract against the
//! paper's ground truth

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extract_evals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub extract_id: i32,

    pub extractor_id: i32,

    pub ground_truth_id: i32,

    pub evaluated_at: Option<DateTimeWithTimeZone>,

    // Title
    pub title_exact_match: Option<bool>,
    pub title_levenshtein_distance: Option<i32>,
    pub title_semantic_similarity: Option<f64>,
    /// Extracted length over ground-truth length
    pub title_length_ratio: Option<f64>,

    // DOI
    pub doi_exact_match: Option<bool>,
    pub doi_is_valid: Option<bool>,

    // Abstract
    pub abstract_rouge_l: Option<f64>,
    pub abstract_bert_score: Option<f64>,

    // Keyword sets
    pub keywords_jaccard_index: Option<f64>,
    pub keywords_f1: Option<f64>,
    pub keywords_precision: Option<f64>,
    pub keywords_recall: Option<f64>,
    pub keywords_avg_jaro_winkler: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    /// Details on the evaluation methods used
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub evaluation_details: Option<Json>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::extract::Entity",
        from = "Column::ExtractId",
        to = "super::extract::Column::Id",
        on_delete = "Cascade"
    )]
    Extract,

    #[sea_orm(
        belongs_to = "super::extractor::Entity",
        from = "Column::ExtractorId",
        to = "super::extractor::Column::Id",
        on_delete = "Cascade"
    )]
    Extractor,

    #[sea_orm(
        belongs_to = "super::ground_truth::Entity",
        from = "Column::GroundTruthId",
        to = "super::ground_truth::Column::Id",
        on_delete = "Cascade"
    )]
    GroundTruth,
}

impl Related<super::extract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extract.def()
    }
}

impl Related<super::extractor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extractor.def()
    }
}

impl Related<super::ground_truth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroundTruth.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stamp_timestamps(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
