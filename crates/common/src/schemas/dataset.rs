//! Dataset schemas

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{patch, patch_opt};
use crate::db::models::{Dataset, DatasetActiveModel};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DatasetCreate {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub version: Option<String>,

    #[validate(length(max = 255))]
    pub source: Option<String>,

    #[validate(length(max = 100))]
    pub license: Option<String>,

    #[validate(length(max = 500))]
    pub folder_path: Option<String>,
}

impl DatasetCreate {
    pub fn into_active_model(self) -> DatasetActiveModel {
        DatasetActiveModel {
            id: NotSet,
            name: Set(self.name),
            description: Set(self.description),
            version: Set(self.version),
            source: Set(self.source),
            license: Set(self.license),
            folder_path: Set(self.folder_path),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DatasetUpdate {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub version: Option<String>,

    #[validate(length(max = 255))]
    pub source: Option<String>,

    #[validate(length(max = 100))]
    pub license: Option<String>,

    #[validate(length(max = 500))]
    pub folder_path: Option<String>,
}

impl DatasetUpdate {
    pub fn apply(self, model: &mut DatasetActiveModel) {
        patch(&mut model.name, self.name);
        patch_opt(&mut model.description, self.description);
        patch_opt(&mut model.version, self.version);
        patch_opt(&mut model.source, self.source);
        patch_opt(&mut model.license, self.license);
        patch_opt(&mut model.folder_path, self.folder_path);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetRead {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub source: Option<String>,
    pub license: Option<String>,
    pub folder_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Dataset> for DatasetRead {
    fn from(d: Dataset) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            version: d.version,
            source: d.source,
            license: d.license,
            folder_path: d.folder_path,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Dataset> for DatasetSummary {
    fn from(d: Dataset) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            version: d.version,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_required_and_bounded() {
        assert!(serde_json::from_str::<DatasetCreate>(r#"{"version": "1"}"#).is_err());

        let create = DatasetCreate {
            name: "x".repeat(256),
            description: None,
            version: None,
            source: None,
            license: None,
            folder_path: None,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut model = DatasetActiveModel::default();
        DatasetUpdate::default().apply(&mut model);
        assert_eq!(model, DatasetActiveModel::default());
    }
}
