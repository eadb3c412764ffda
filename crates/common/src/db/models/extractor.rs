//! Extractor entity - a configured extraction tool
//!
//! An extractor is identified by the tuple
//! (extractor_type, version, variant, config_hash, parser_config_hash);
//! the `extractors` table carries a unique index over it. Its display name
//! is derived from the same fields and never stored.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

use crate::validation::{self, FormatError};

/// Name used when none of the naming fields are present
pub const UNNAMED_EXTRACTOR: &str = "unnamed_extractor";

/// Number of hash characters kept in display names
const HASH_PREFIX_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extractors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// grobid, docling, ...
    pub extractor_type: String,

    /// e.g. 0.8.3-SNAPSHOT
    pub version: Option<String>,

    /// Author or organization
    pub author: Option<String>,

    /// delft, crf, ... where applicable
    pub variant: Option<String>,

    pub release_date: Option<Date>,

    pub release_git_hash: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    // Parser
    pub parser_name: Option<String>,
    pub parser_version: Option<String>,
    pub parser_git_hash: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub parser_config: Option<Json>,
    pub parser_config_hash: Option<String>,

    // Configuration
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub config_schema: Option<Json>,
    pub config_hash: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub default_config: Option<Json>,

    // Docker
    pub docker_image: Option<String>,
    pub docker_tag: Option<String>,
    pub docker_digest: Option<String>,

    // Endpoints
    pub development_endpoint: Option<String>,
    pub development_endpoint_enabled: bool,
    pub production_endpoint: Option<String>,
    pub production_endpoint_enabled: bool,

    pub is_enabled: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Human-readable name, e.g. `grobid_delft_0.8.3_cabc12345`
    pub fn name(&self) -> String {
        display_name(
            Some(&self.extractor_type),
            self.variant.as_deref(),
            self.version.as_deref(),
            self.config_hash.as_deref(),
            self.parser_config_hash.as_deref(),
        )
    }
}

/// Build an extractor display name.
///
/// Present values of type, variant and version are joined with `_`, followed
/// by `c<first 8 chars of config_hash>` and `p<first 8 chars of
/// parser_config_hash>` when those hashes are non-empty. Falls back to
/// [`UNNAMED_EXTRACTOR`] when nothing is left.
pub fn display_name(
    extractor_type: Option<&str>,
    variant: Option<&str>,
    version: Option<&str>,
    config_hash: Option<&str>,
    parser_config_hash: Option<&str>,
) -> String {
    let mut parts: Vec<String> = [extractor_type, variant, version]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    if let Some(hash) = config_hash.filter(|h| !h.is_empty()) {
        parts.push(format!("c{}", hash_prefix(hash)));
    }
    if let Some(hash) = parser_config_hash.filter(|h| !h.is_empty()) {
        parts.push(format!("p{}", hash_prefix(hash)));
    }

    if parts.is_empty() {
        UNNAMED_EXTRACTOR.to_string()
    } else {
        parts.join("_")
    }
}

fn hash_prefix(hash: &str) -> String {
    hash.chars().take(HASH_PREFIX_LEN).collect()
}

/// Newly written string value of an optional column
fn written(value: &ActiveValue<Option<String>>) -> Option<&str> {
    match value {
        ActiveValue::Set(Some(v)) => Some(v.as_str()),
        _ => None,
    }
}

impl ActiveModel {
    /// Format checks over every field that is being written
    pub fn check_formats(&self) -> Result<(), FormatError> {
        use validation::{check_docker_image, check_git_hash, check_optional, check_sha256, check_url};

        check_optional(check_url, "development_endpoint", written(&self.development_endpoint))?;
        check_optional(check_url, "production_endpoint", written(&self.production_endpoint))?;
        check_optional(check_git_hash, "release_git_hash", written(&self.release_git_hash))?;
        check_optional(check_git_hash, "parser_git_hash", written(&self.parser_git_hash))?;
        check_optional(check_sha256, "config_hash", written(&self.config_hash))?;
        check_optional(check_sha256, "parser_config_hash", written(&self.parser_config_hash))?;
        check_optional(check_docker_image, "docker_image", written(&self.docker_image))?;
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::extract::Entity")]
    Extracts,

    #[sea_orm(has_many = "super::extract_eval::Entity")]
    ExtractEvals,
}

impl Related<super::extract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extracts.def()
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
        self.check_formats()
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        super::stamp_timestamps(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::Set;

    const CONFIG_HASH: &str = "abc12345deadbeefabc12345deadbeefabc12345deadbeefabc12345deadbeef";

    #[test]
    fn test_name_with_config_hash() {
        let name = display_name(Some("grobid"), Some("delft"), Some("0.8.3"), Some(CONFIG_HASH), None);
        assert_eq!(name, "grobid_delft_0.8.3_cabc12345");
    }

    #[test]
    fn test_name_with_both_hashes() {
        let parser = "0123456789abcdef".repeat(4);
        let name = display_name(Some("docling"), None, Some("2.1"), Some(CONFIG_HASH), Some(&parser));
        assert_eq!(name, "docling_2.1_cabc12345_p01234567");
    }

    #[test]
    fn test_name_skips_missing_fields() {
        assert_eq!(display_name(Some("grobid"), None, None, None, None), "grobid");
        assert_eq!(display_name(Some("grobid"), None, None, Some(""), None), "grobid");
    }

    #[test]
    fn test_name_placeholder_when_empty() {
        assert_eq!(display_name(None, None, None, None, None), UNNAMED_EXTRACTOR);
    }

    #[test]
    fn test_short_hash_is_kept_whole() {
        assert_eq!(display_name(Some("x"), None, None, Some("abc"), None), "x_cabc");
    }

    #[test]
    fn test_check_formats_names_the_field() {
        let model = ActiveModel {
            extractor_type: Set("grobid".to_string()),
            release_git_hash: Set(Some("a".repeat(39))),
            ..Default::default()
        };
        let err = model.check_formats().unwrap_err();
        assert_eq!(err.field, "release_git_hash");
    }

    #[test]
    fn test_check_formats_ignores_unchanged_values() {
        let model = ActiveModel {
            config_hash: ActiveValue::Unchanged(Some("legacy".to_string())),
            docker_image: Set(Some("lfoppiano/grobid".to_string())),
            ..Default::default()
        };
        assert!(model.check_formats().is_ok());
    }
}
