//! Paper entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Local PDF file path
    pub pdf_path: Option<String>,

    /// Remote PDF URL
    pub pdf_url: Option<String>,

    /// SHA-256 of the PDF, used as the dedup key
    #[sea_orm(unique)]
    pub pdf_hash: Option<String>,

    pub pdf_actual_start_page: i32,

    /// Last page taken into account
    pub pdf_actual_last_page: Option<i32>,

    /// Provenance (arXiv, manual upload, ...)
    pub source: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::extract::Entity")]
    Extracts,

    #[sea_orm(has_one = "super::ground_truth::Entity")]
    GroundTruth,

    #[sea_orm(has_many = "super::dataset_paper::Entity")]
    DatasetPapers,
}

impl Related<super::extract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extracts.def()
    }
}

impl Related<super::ground_truth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroundTruth.def()
    }
}

impl Related<super::dataset_paper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DatasetPapers.def()
    }
}

impl Related<super::dataset::Entity> for Entity {
    fn to() -> RelationDef {
        super::dataset_paper::Relation::Dataset.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dataset_paper::Relation::Paper.def().rev())
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
