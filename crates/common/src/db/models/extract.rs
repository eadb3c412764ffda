//! Extract entity - one extractor run against one paper

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of an extraction run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractStatus {
    #[default]
    Completed,
    Failed,
    Partial,
}

impl ExtractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractStatus::Completed => "completed",
            ExtractStatus::Failed => "failed",
            ExtractStatus::Partial => "partial",
        }
    }
}

impl fmt::Display for ExtractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ExtractStatus::Completed),
            "failed" => Ok(ExtractStatus::Failed),
            "partial" => Ok(ExtractStatus::Partial),
            other => Err(format!("unknown extract status: {}", other)),
        }
    }
}

impl From<ExtractStatus> for String {
    fn from(status: ExtractStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub paper_id: i32,

    pub extractor_id: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,

    pub doi: Option<String>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub authors: Option<Json>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub refs: Option<Json>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub xrefs: Option<Json>,

    #[sea_orm(column_name = "abstract", column_type = "Text", nullable)]
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub keywords: Option<Vec<String>>,

    /// Unparsed extractor output, when kept
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_output: Option<String>,

    pub status: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,

    pub processing_time_seconds: Option<f64>,

    pub extracted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Stored status as an enum; unknown values are reported, not coerced
    pub fn extract_status(&self) -> Result<ExtractStatus, String> {
        self.status.parse()
    }
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

    #[sea_orm(
        belongs_to = "super::extractor::Entity",
        from = "Column::ExtractorId",
        to = "super::extractor::Column::Id",
        on_delete = "Cascade"
    )]
    Extractor,

    #[sea_orm(has_many = "super::extract_eval::Entity")]
    ExtractEvals,
}

impl Related<super::paper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paper.def()
    }
}

impl Related<super::extractor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extractor.def()
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
        if let sea_orm::ActiveValue::Set(status) = &self.status {
            ExtractStatus::from_str(status).map_err(DbErr::Custom)?;
        }
        super::stamp_timestamps(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [ExtractStatus::Completed, ExtractStatus::Failed, ExtractStatus::Partial] {
            assert_eq!(status.as_str().parse::<ExtractStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("pending".parse::<ExtractStatus>().is_err());
        assert!("Completed".parse::<ExtractStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ExtractStatus::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
        assert!(serde_json::from_str::<ExtractStatus>("\"unknown\"").is_err());
    }
}
