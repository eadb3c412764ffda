//! Ground truth schemas

use sea_orm::entity::prelude::{DateTimeWithTimeZone, Json};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{patch, patch_opt};
use crate::db::models::{GroundTruth, GroundTruthActiveModel};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GroundTruthCreate {
    pub paper_id: i32,

    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(max = 255))]
    pub doi: Option<String>,

    pub authors: Option<Json>,

    pub refs: Option<Json>,

    pub xrefs: Option<Json>,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub keywords: Option<Vec<String>>,

    pub description: Option<String>,
}

impl GroundTruthCreate {
    pub fn into_active_model(self) -> GroundTruthActiveModel {
        GroundTruthActiveModel {
            id: NotSet,
            paper_id: Set(self.paper_id),
            title: Set(self.title),
            doi: Set(self.doi),
            authors: Set(self.authors),
            refs: Set(self.refs),
            xrefs: Set(self.xrefs),
            abstract_text: Set(self.abstract_text),
            keywords: Set(self.keywords),
            description: Set(self.description),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

/// The owning paper cannot be changed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GroundTruthUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,

    #[validate(length(max = 255))]
    pub doi: Option<String>,

    pub authors: Option<Json>,

    pub refs: Option<Json>,

    pub xrefs: Option<Json>,

    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub keywords: Option<Vec<String>>,

    pub description: Option<String>,
}

impl GroundTruthUpdate {
    pub fn apply(self, model: &mut GroundTruthActiveModel) {
        patch(&mut model.title, self.title);
        patch_opt(&mut model.doi, self.doi);
        patch_opt(&mut model.authors, self.authors);
        patch_opt(&mut model.refs, self.refs);
        patch_opt(&mut model.xrefs, self.xrefs);
        patch_opt(&mut model.abstract_text, self.abstract_text);
        patch_opt(&mut model.keywords, self.keywords);
        patch_opt(&mut model.description, self.description);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroundTruthRead {
    pub id: i32,
    pub paper_id: i32,
    pub title: String,
    pub doi: Option<String>,
    pub authors: Option<Json>,
    pub refs: Option<Json>,
    pub xrefs: Option<Json>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<GroundTruth> for GroundTruthRead {
    fn from(g: GroundTruth) -> Self {
        Self {
            id: g.id,
            paper_id: g.paper_id,
            title: g.title,
            doi: g.doi,
            authors: g.authors,
            refs: g.refs,
            xrefs: g.xrefs,
            abstract_text: g.abstract_text,
            keywords: g.keywords,
            description: g.description,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroundTruthSummary {
    pub id: i32,
    pub paper_id: i32,
    pub title: String,
    pub doi: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<GroundTruth> for GroundTruthSummary {
    fn from(g: GroundTruth) -> Self {
        Self {
            id: g.id,
            paper_id: g.paper_id,
            title: g.title,
            doi: g.doi,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}
