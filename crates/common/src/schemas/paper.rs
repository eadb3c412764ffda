//! Paper schemas

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{patch, patch_opt, DatasetRead, ExtractRead, GroundTruthRead};
use crate::db::models::{Dataset, Extract, GroundTruth, Paper, PaperActiveModel};
use crate::validation::{validate_sha256, validate_url};

fn default_start_page() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaperCreate {
    #[validate(length(max = 500))]
    pub pdf_path: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url"))]
    pub pdf_url: Option<String>,

    #[validate(custom(function = "validate_sha256"))]
    pub pdf_hash: Option<String>,

    #[serde(default = "default_start_page")]
    pub pdf_actual_start_page: i32,

    pub pdf_actual_last_page: Option<i32>,

    #[validate(length(max = 255))]
    pub source: Option<String>,
}

impl PaperCreate {
    pub fn into_active_model(self) -> PaperActiveModel {
        PaperActiveModel {
            id: NotSet,
            pdf_path: Set(self.pdf_path),
            pdf_url: Set(self.pdf_url),
            pdf_hash: Set(self.pdf_hash),
            pdf_actual_start_page: Set(self.pdf_actual_start_page),
            pdf_actual_last_page: Set(self.pdf_actual_last_page),
            source: Set(self.source),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PaperUpdate {
    #[validate(length(max = 500))]
    pub pdf_path: Option<String>,

    #[validate(length(max = 500), custom(function = "validate_url"))]
    pub pdf_url: Option<String>,

    #[validate(custom(function = "validate_sha256"))]
    pub pdf_hash: Option<String>,

    pub pdf_actual_start_page: Option<i32>,

    pub pdf_actual_last_page: Option<i32>,

    #[validate(length(max = 255))]
    pub source: Option<String>,
}

impl PaperUpdate {
    pub fn apply(self, model: &mut PaperActiveModel) {
        patch_opt(&mut model.pdf_path, self.pdf_path);
        patch_opt(&mut model.pdf_url, self.pdf_url);
        patch_opt(&mut model.pdf_hash, self.pdf_hash);
        patch(&mut model.pdf_actual_start_page, self.pdf_actual_start_page);
        patch_opt(&mut model.pdf_actual_last_page, self.pdf_actual_last_page);
        patch_opt(&mut model.source, self.source);
    }
}

/// Paper with its extracts, ground truth and dataset memberships
#[derive(Debug, Clone, Serialize)]
pub struct PaperRead {
    pub id: i32,
    pub pdf_path: Option<String>,
    pub pdf_url: Option<String>,
    pub pdf_hash: Option<String>,
    pub pdf_actual_start_page: i32,
    pub pdf_actual_last_page: Option<i32>,
    pub source: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub extracts: Vec<ExtractRead>,
    pub ground_truth: Option<GroundTruthRead>,
    pub datasets: Vec<DatasetRead>,
}

impl PaperRead {
    pub fn assemble(
        paper: Paper,
        extracts: Vec<Extract>,
        ground_truth: Option<GroundTruth>,
        datasets: Vec<Dataset>,
    ) -> Self {
        Self {
            id: paper.id,
            pdf_path: paper.pdf_path,
            pdf_url: paper.pdf_url,
            pdf_hash: paper.pdf_hash,
            pdf_actual_start_page: paper.pdf_actual_start_page,
            pdf_actual_last_page: paper.pdf_actual_last_page,
            source: paper.source,
            created_at: paper.created_at,
            updated_at: paper.updated_at,
            extracts: extracts.into_iter().map(Into::into).collect(),
            ground_truth: ground_truth.map(Into::into),
            datasets: datasets.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Paper> for PaperRead {
    fn from(paper: Paper) -> Self {
        Self::assemble(paper, Vec::new(), None, Vec::new())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaperSummary {
    pub id: i32,
    pub pdf_path: Option<String>,
    pub pdf_url: Option<String>,
    pub source: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Paper> for PaperSummary {
    fn from(paper: Paper) -> Self {
        Self {
            id: paper.id,
            pdf_path: paper.pdf_path,
            pdf_url: paper.pdf_url,
            source: paper.source,
            created_at: paper.created_at,
            updated_at: paper.updated_at,
        }
    }
}
