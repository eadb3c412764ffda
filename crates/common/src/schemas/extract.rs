//! Extract schemas

use sea_orm::entity::prelude::{DateTimeWithTimeZone, Json};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{patch, patch_opt};
use crate::db::models::{Extract, ExtractActiveModel, ExtractStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtractCreate {
    pub paper_id: i32,

    pub extractor_id: i32,

    pub title: Option<String>,

    #[validate(length(max = 255))]
    pub doi: Option<String>,

    pub authors: Option<Json>,

    pub refs: Option<Json>,

    pub xrefs: Option<Json>,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub keywords: Option<Vec<String>>,

    pub raw_output: Option<String>,

    /// Unknown statuses fail deserialization
    #[serde(default)]
    pub status: ExtractStatus,

    pub error_message: Option<String>,

    #[validate(range(min = 0.0))]
    pub processing_time_seconds: Option<f64>,

    pub extracted_at: Option<DateTimeWithTimeZone>,
}

impl ExtractCreate {
    pub fn into_active_model(self) -> ExtractActiveModel {
        ExtractActiveModel {
            id: NotSet,
            paper_id: Set(self.paper_id),
            extractor_id: Set(self.extractor_id),
            title: Set(self.title),
            doi: Set(self.doi),
            authors: Set(self.authors),
            refs: Set(self.refs),
            xrefs: Set(self.xrefs),
            abstract_text: Set(self.abstract_text),
            keywords: Set(self.keywords),
            raw_output: Set(self.raw_output),
            status: Set(self.status.into()),
            error_message: Set(self.error_message),
            processing_time_seconds: Set(self.processing_time_seconds),
            extracted_at: Set(self.extracted_at),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

/// The owning paper and extractor cannot be changed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExtractUpdate {
    pub title: Option<String>,

    #[validate(length(max = 255))]
    pub doi: Option<String>,

    pub authors: Option<Json>,

    pub refs: Option<Json>,

    pub xrefs: Option<Json>,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub keywords: Option<Vec<String>>,

    pub raw_output: Option<String>,

    pub status: Option<ExtractStatus>,

    pub error_message: Option<String>,

    #[validate(range(min = 0.0))]
    pub processing_time_seconds: Option<f64>,

    pub extracted_at: Option<DateTimeWithTimeZone>,
}

impl ExtractUpdate {
    pub fn apply(self, model: &mut ExtractActiveModel) {
        patch_opt(&mut model.title, self.title);
        patch_opt(&mut model.doi, self.doi);
        patch_opt(&mut model.authors, self.authors);
        patch_opt(&mut model.refs, self.refs);
        patch_opt(&mut model.xrefs, self.xrefs);
        patch_opt(&mut model.abstract_text, self.abstract_text);
        patch_opt(&mut model.keywords, self.keywords);
        patch_opt(&mut model.raw_output, self.raw_output);
        patch(&mut model.status, self.status.map(String::from));
        patch_opt(&mut model.error_message, self.error_message);
        patch_opt(&mut model.processing_time_seconds, self.processing_time_seconds);
        patch_opt(&mut model.extracted_at, self.extracted_at);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRead {
    pub id: i32,
    pub paper_id: i32,
    pub extractor_id: i32,
    pub title: Option<String>,
    pub doi: Option<String>,
    pub authors: Option<Json>,
    pub refs: Option<Json>,
    pub xrefs: Option<Json>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub raw_output: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    pub processing_time_seconds: Option<f64>,
    pub extracted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Extract> for ExtractRead {
    fn from(e: Extract) -> Self {
        Self {
            id: e.id,
            paper_id: e.paper_id,
            extractor_id: e.extractor_id,
            title: e.title,
            doi: e.doi,
            authors: e.authors,
            refs: e.refs,
            xrefs: e.xrefs,
            abstract_text: e.abstract_text,
            keywords: e.keywords,
            raw_output: e.raw_output,
            status: e.status,
            error_message: e.error_message,
            processing_time_seconds: e.processing_time_seconds,
            extracted_at: e.extracted_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub id: i32,
    pub paper_id: i32,
    pub extractor_id: i32,
    pub status: String,
    pub extracted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Extract> for ExtractSummary {
    fn from(e: Extract) -> Self {
        Self {
            id: e.id,
            paper_id: e.paper_id,
            extractor_id: e.extractor_id,
            status: e.status,
            extracted_at: e.extracted_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_completed() {
        let create: ExtractCreate =
            serde_json::from_str(r#"{"paper_id": 1, "extractor_id": 2}"#).unwrap();
        assert_eq!(create.status, ExtractStatus::Completed);
        assert_eq!(create.into_active_model().status, Set("completed".to_string()));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = serde_json::from_str::<ExtractCreate>(
            r#"{"paper_id": 1, "extractor_id": 2, "status": "done"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_processing_time_rejected() {
        let create: ExtractCreate = serde_json::from_str(
            r#"{"paper_id": 1, "extractor_id": 2, "processing_time_seconds": -1.5}"#,
        )
        .unwrap();
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_update_status() {
        let mut model = ExtractActiveModel::default();
        ExtractUpdate {
            status: Some(ExtractStatus::Failed),
            error_message: Some("timeout".to_string()),
            ..Default::default()
        }
        .apply(&mut model);
        assert_eq!(model.status, Set("failed".to_string()));
        assert_eq!(model.error_message, Set(Some("timeout".to_string())));
        assert!(model.title.is_not_set());
    }
}
