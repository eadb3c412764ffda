//! Extractor schemas

use sea_orm::entity::prelude::{Date, DateTimeWithTimeZone, Json};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_true, patch, patch_opt};
use crate::db::models::{Extractor, ExtractorActiveModel};
use crate::validation::{
    self, validate_docker_image, validate_git_hash, validate_sha256, validate_url,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtractorCreate {
    #[validate(length(min = 1, max = 20))]
    pub extractor_type: String,

    #[validate(length(max = 30))]
    pub version: Option<String>,

    #[validate(length(max = 50))]
    pub author: Option<String>,

    #[validate(length(max = 50))]
    pub variant: Option<String>,

    pub release_date: Option<Date>,

    #[validate(custom(function = "validate_git_hash"))]
    pub release_git_hash: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub parser_name: Option<String>,

    #[validate(length(max = 50))]
    pub parser_version: Option<String>,

    #[validate(custom(function = "validate_git_hash"))]
    pub parser_git_hash: Option<String>,

    pub parser_config: Option<Json>,

    #[validate(custom(function = "validate_sha256"))]
    pub parser_config_hash: Option<String>,

    pub config_schema: Option<Json>,

    #[validate(custom(function = "validate_sha256"))]
    pub config_hash: Option<String>,

    pub default_config: Option<Json>,

    #[validate(length(max = 255), custom(function = "validate_docker_image"))]
    pub docker_image: Option<String>,

    #[validate(length(max = 100))]
    pub docker_tag: Option<String>,

    #[validate(length(max = 100))]
    pub docker_digest: Option<String>,

    #[validate(length(max = 255), custom(function = "validate_url"))]
    pub development_endpoint: Option<String>,

    #[serde(default)]
    pub development_endpoint_enabled: bool,

    #[validate(length(max = 255), custom(function = "validate_url"))]
    pub production_endpoint: Option<String>,

    #[serde(default)]
    pub production_endpoint_enabled: bool,

    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

impl ExtractorCreate {
    /// Minimal input: only the extractor type, everything else defaulted
    pub fn new(extractor_type: impl Into<String>) -> Self {
        Self {
            extractor_type: extractor_type.into(),
            version: None,
            author: None,
            variant: None,
            release_date: None,
            release_git_hash: None,
            description: None,
            parser_name: None,
            parser_version: None,
            parser_git_hash: None,
            parser_config: None,
            parser_config_hash: None,
            config_schema: None,
            config_hash: None,
            default_config: None,
            docker_image: None,
            docker_tag: None,
            docker_digest: None,
            development_endpoint: None,
            development_endpoint_enabled: false,
            production_endpoint: None,
            production_endpoint_enabled: false,
            is_enabled: true,
        }
    }

    /// Hashes that were not supplied are derived from the matching config
    /// document, so identical configurations share a uniqueness key.
    pub fn into_active_model(self) -> ExtractorActiveModel {
        let config_hash = self
            .config_hash
            .or_else(|| self.default_config.as_ref().map(validation::config_hash));
        let parser_config_hash = self
            .parser_config_hash
            .or_else(|| self.parser_config.as_ref().map(validation::config_hash));

        ExtractorActiveModel {
            id: NotSet,
            extractor_type: Set(self.extractor_type),
            version: Set(self.version),
            author: Set(self.author),
            variant: Set(self.variant),
            release_date: Set(self.release_date),
            release_git_hash: Set(self.release_git_hash),
            description: Set(self.description),
            parser_name: Set(self.parser_name),
            parser_version: Set(self.parser_version),
            parser_git_hash: Set(self.parser_git_hash),
            parser_config: Set(self.parser_config),
            parser_config_hash: Set(parser_config_hash),
            config_schema: Set(self.config_schema),
            config_hash: Set(config_hash),
            default_config: Set(self.default_config),
            docker_image: Set(self.docker_image),
            docker_tag: Set(self.docker_tag),
            docker_digest: Set(self.docker_digest),
            development_endpoint: Set(self.development_endpoint),
            development_endpoint_enabled: Set(self.development_endpoint_enabled),
            production_endpoint: Set(self.production_endpoint),
            production_endpoint_enabled: Set(self.production_endpoint_enabled),
            is_enabled: Set(self.is_enabled),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExtractorUpdate {
    #[validate(length(min = 1, max = 20))]
    pub extractor_type: Option<String>,

    #[validate(length(max = 30))]
    pub version: Option<String>,

    #[validate(length(max = 50))]
    pub author: Option<String>,

    #[validate(length(max = 50))]
    pub variant: Option<String>,

    pub release_date: Option<Date>,

    #[validate(custom(function = "validate_git_hash"))]
    pub release_git_hash: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub parser_name: Option<String>,

    #[validate(length(max = 50))]
    pub parser_version: Option<String>,

    #[validate(custom(function = "validate_git_hash"))]
    pub parser_git_hash: Option<String>,

    pub parser_config: Option<Json>,

    #[validate(custom(function = "validate_sha256"))]
    pub parser_config_hash: Option<String>,

    pub config_schema: Option<Json>,

    #[validate(custom(function = "validate_sha256"))]
    pub config_hash: Option<String>,

    pub default_config: Option<Json>,

    #[validate(length(max = 255), custom(function = "validate_docker_image"))]
    pub docker_image: Option<String>,

    #[validate(length(max = 100))]
    pub docker_tag: Option<String>,

    #[validate(length(max = 100))]
    pub docker_digest: Option<String>,

    #[validate(length(max = 255), custom(function = "validate_url"))]
    pub development_endpoint: Option<String>,

    pub development_endpoint_enabled: Option<bool>,

    #[validate(length(max = 255), custom(function = "validate_url"))]
    pub production_endpoint: Option<String>,

    pub production_endpoint_enabled: Option<bool>,

    pub is_enabled: Option<bool>,
}

impl ExtractorUpdate {
    /// Patch `model`. Replacing a config document without naming its hash
    /// re-derives the hash, keeping the uniqueness key in step with the row.
    pub fn apply(mut self, model: &mut ExtractorActiveModel) {
        if self.config_hash.is_none() {
            self.config_hash = self.default_config.as_ref().map(validation::config_hash);
        }
        if self.parser_config_hash.is_none() {
            self.parser_config_hash = self.parser_config.as_ref().map(validation::config_hash);
        }

        patch(&mut model.extractor_type, self.extractor_type);
        patch_opt(&mut model.version, self.version);
        patch_opt(&mut model.author, self.author);
        patch_opt(&mut model.variant, self.variant);
        patch_opt(&mut model.release_date, self.release_date);
        patch_opt(&mut model.release_git_hash, self.release_git_hash);
        patch_opt(&mut model.description, self.description);
        patch_opt(&mut model.parser_name, self.parser_name);
        patch_opt(&mut model.parser_version, self.parser_version);
        patch_opt(&mut model.parser_git_hash, self.parser_git_hash);
        patch_opt(&mut model.parser_config, self.parser_config);
        patch_opt(&mut model.parser_config_hash, self.parser_config_hash);
        patch_opt(&mut model.config_schema, self.config_schema);
        patch_opt(&mut model.config_hash, self.config_hash);
        patch_opt(&mut model.default_config, self.default_config);
        patch_opt(&mut model.docker_image, self.docker_image);
        patch_opt(&mut model.docker_tag, self.docker_tag);
        patch_opt(&mut model.docker_digest, self.docker_digest);
        patch_opt(&mut model.development_endpoint, self.development_endpoint);
        patch(&mut model.development_endpoint_enabled, self.development_endpoint_enabled);
        patch_opt(&mut model.production_endpoint, self.production_endpoint);
        patch(&mut model.production_endpoint_enabled, self.production_endpoint_enabled);
        patch(&mut model.is_enabled, self.is_enabled);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractorRead {
    pub id: i32,
    /// Derived display name
    pub name: String,
    pub extractor_type: String,
    pub version: Option<String>,
    pub author: Option<String>,
    pub variant: Option<String>,
    pub release_date: Option<Date>,
    pub release_git_hash: Option<String>,
    pub description: Option<String>,
    pub parser_name: Option<String>,
    pub parser_version: Option<String>,
    pub parser_git_hash: Option<String>,
    pub parser_config: Option<Json>,
    pub parser_config_hash: Option<String>,
    pub config_schema: Option<Json>,
    pub config_hash: Option<String>,
    pub default_config: Option<Json>,
    pub docker_image: Option<String>,
    pub docker_tag: Option<String>,
    pub docker_digest: Option<String>,
    pub development_endpoint: Option<String>,
    pub development_endpoint_enabled: bool,
    pub production_endpoint: Option<String>,
    pub production_endpoint_enabled: bool,
    pub is_enabled: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Extractor> for ExtractorRead {
    fn from(e: Extractor) -> Self {
        Self {
            id: e.id,
            name: e.name(),
            extractor_type: e.extractor_type,
            version: e.version,
            author: e.author,
            variant: e.variant,
            release_date: e.release_date,
            release_git_hash: e.release_git_hash,
            description: e.description,
            parser_name: e.parser_name,
            parser_version: e.parser_version,
            parser_git_hash: e.parser_git_hash,
            parser_config: e.parser_config,
            parser_config_hash: e.parser_config_hash,
            config_schema: e.config_schema,
            config_hash: e.config_hash,
            default_config: e.default_config,
            docker_image: e.docker_image,
            docker_tag: e.docker_tag,
            docker_digest: e.docker_digest,
            development_endpoint: e.development_endpoint,
            development_endpoint_enabled: e.development_endpoint_enabled,
            production_endpoint: e.production_endpoint,
            production_endpoint_enabled: e.production_endpoint_enabled,
            is_enabled: e.is_enabled,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// List view
#[derive(Debug, Clone, Serialize)]
pub struct ExtractorSummary {
    pub id: i32,
    pub name: String,
    pub extractor_type: String,
    pub version: Option<String>,
    pub variant: Option<String>,
    pub description: Option<String>,
    pub is_enabled: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Extractor> for ExtractorSummary {
    fn from(e: Extractor) -> Self {
        Self {
            id: e.id,
            name: e.name(),
            extractor_type: e.extractor_type,
            version: e.version,
            variant: e.variant,
            description: e.description,
            is_enabled: e.is_enabled,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
