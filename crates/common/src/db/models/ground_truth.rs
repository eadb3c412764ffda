//! Ground truth entity - manually verified reference data for a paper

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ground_truths")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At most one ground truth per paper
    #[sea_orm(unique)]
    pub paper_id: i32,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    pub doi: Option<String>,

    /// Author list in papercheck format
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub authors: Option<Json>,

    /// Bibliography entries
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub refs: Option<Json>,

    /// In-text cross references
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub xrefs: Option<Json>,

    #[sea_orm(column_name = "abstract", column_type = "Text", nullable)]
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub keywords: Option<Vec<String>>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::paper::Entity",
        from = "Column::PaperId",
        to = "super::paper::Column::Id",
        on_delete = "Cascade"
    )]
    Paper,

    #[sea_orm(has_many = "super::extract_eval::Entity")]
    ExtractEvals,
}

impl Related<super::paper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paper.def()
    }
}

impl Related<super::extract_eval::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtractEvals.def()
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
