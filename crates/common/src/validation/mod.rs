//! Field format validators
//!
//! Each check is usable directly (returning a [`FormatError`] that names the
//! field and the expected format) and through thin `validator` adapters used
//! by the request schemas in [`crate::schemas`].

use regex_lite::Regex;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;
use validator::ValidationError;

/// A value rejected by one of the format checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub field: String,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid format for {}: {}. Expected {}.",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for FormatError {}

/// Expected-format descriptions, also used as validator messages
pub const URL_FORMAT: &str = "an http(s) URL";
pub const GIT_HASH_FORMAT: &str = "40 hexadecimal characters";
pub const SHA256_FORMAT: &str = "64 hexadecimal characters";
pub const DOCKER_IMAGE_FORMAT: &str = "a docker image name ([registry[:port]/][namespace/]name)";

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^https?://",
            r"(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)*",
            r"[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?",
            r"(?::\d+)?",
            r"(?:/.*)?$",
        ))
        .expect("url pattern compiles")
    })
}

fn git_hash_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-fA-F0-9]{40}$").expect("git hash pattern compiles"))
}

fn sha256_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-fA-F0-9]{64}$").expect("sha256 pattern compiles"))
}

fn docker_image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[a-zA-Z0-9.-]+(?::[0-9]+)?/)?",
            r"(?:[a-zA-Z0-9._-]+/)*",
            r"[a-zA-Z0-9._-]+$",
        ))
        .expect("docker image pattern compiles")
    })
}

fn check(
    re: &Regex,
    field: &str,
    value: &str,
    expected: &'static str,
) -> Result<(), FormatError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(FormatError {
            field: field.to_string(),
            value: value.to_string(),
            expected,
        })
    }
}

/// Endpoint / download URLs
pub fn check_url(field: &str, value: &str) -> Result<(), FormatError> {
    check(url_regex(), field, value, URL_FORMAT)
}

/// Full git commit hashes
pub fn check_git_hash(field: &str, value: &str) -> Result<(), FormatError> {
    check(git_hash_regex(), field, value, GIT_HASH_FORMAT)
}

/// SHA-256 hex digests (config hashes, PDF hashes)
pub fn check_sha256(field: &str, value: &str) -> Result<(), FormatError> {
    check(sha256_regex(), field, value, SHA256_FORMAT)
}

pub fn check_docker_image(field: &str, value: &str) -> Result<(), FormatError> {
    check(docker_image_regex(), field, value, DOCKER_IMAGE_FORMAT)
}

/// Apply `check` to an optional value; `None` always passes
pub fn check_optional(
    check: fn(&str, &str) -> Result<(), FormatError>,
    field: &str,
    value: Option<&str>,
) -> Result<(), FormatError> {
    value.map_or(Ok(()), |v| check(field, v))
}

/// SHA-256 of the canonical JSON encoding of a configuration document.
///
/// `serde_json` maps keep their keys sorted, so logically equal documents
/// hash identically regardless of the key order they were written in.
pub fn config_hash(config: &serde_json::Value) -> String {
    let canonical = config.to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

fn to_validation_error(code: &'static str, expected: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(format!("must be {}", expected)))
}

// Adapters for `#[validate(custom(function = ...))]`

pub fn validate_url(value: &str) -> Result<(), ValidationError> {
    check_url("", value).map_err(|_| to_validation_error("url", URL_FORMAT))
}

pub fn validate_git_hash(value: &str) -> Result<(), ValidationError> {
    check_git_hash("", value).map_err(|_| to_validation_error("git_hash", GIT_HASH_FORMAT))
}

pub fn validate_sha256(value: &str) -> Result<(), ValidationError> {
    check_sha256("", value).map_err(|_| to_validation_error("sha256", SHA256_FORMAT))
}

pub fn validate_docker_image(value: &str) -> Result<(), ValidationError> {
    check_docker_image("", value)
        .map_err(|_| to_validation_error("docker_image", DOCKER_IMAGE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_hash_length_is_exact() {
        let ok = "a".repeat(40);
        assert!(check_git_hash("release_git_hash", &ok).is_ok());
        assert!(check_git_hash("release_git_hash", &"a".repeat(39)).is_err());
        assert!(check_git_hash("release_git_hash", &"a".repeat(41)).is_err());
    }

    #[test]
    fn test_git_hash_rejects_non_hex() {
        let bad = format!("{}g", "0".repeat(39));
        let err = check_git_hash("parser_git_hash", &bad).unwrap_err();
        assert_eq!(err.field, "parser_git_hash");
        assert!(err.to_string().contains("40 hexadecimal characters"));
    }

    #[test]
    fn test_sha256_length_is_exact() {
        assert!(check_sha256("config_hash", &"F".repeat(64)).is_ok());
        assert!(check_sha256("config_hash", &"f".repeat(63)).is_err());
        assert!(check_sha256("config_hash", &"f".repeat(65)).is_err());
        assert!(check_sha256("config_hash", &"a".repeat(40)).is_err());
    }

    #[test]
    fn test_urls() {
        assert!(check_url("development_endpoint", "http://localhost:8070/api").is_ok());
        assert!(check_url("development_endpoint", "HTTPS://grobid.example.org").is_ok());
        assert!(check_url("production_endpoint", "ftp://example.org").is_err());
        assert!(check_url("production_endpoint", "example.org").is_err());
        assert!(check_url("production_endpoint", "http://-bad-.org").is_err());
    }

    #[test]
    fn test_docker_images() {
        assert!(check_docker_image("docker_image", "grobid").is_ok());
        assert!(check_docker_image("docker_image", "lfoppiano/grobid").is_ok());
        assert!(check_docker_image("docker_image", "registry.example.com:5000/ml/grobid").is_ok());
        assert!(check_docker_image("docker_image", "grobid:0.8.1").is_err());
        assert!(check_docker_image("docker_image", "bad image").is_err());
    }

    #[test]
    fn test_optional_none_passes() {
        assert!(check_optional(check_git_hash, "release_git_hash", None).is_ok());
        assert!(check_optional(check_git_hash, "release_git_hash", Some("abc")).is_err());
    }

    #[test]
    fn test_config_hash_is_key_order_independent() {
        let a: serde_json::Value = serde_json::from_str(r#"{"model":"delft","batch":8}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"batch":8,"model":"delft"}"#).unwrap();
        let hash = config_hash(&a);
        assert_eq!(hash, config_hash(&b));
        assert!(check_sha256("config_hash", &hash).is_ok());
    }
}
