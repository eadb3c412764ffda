//! PaperCheck Common Library
//!
//! Shared code for the PaperCheck services:
//! - Database entities, migrations and repository functions
//! - Request/response validation schemas
//! - Format validators
//! - Error types and handling
//! - Configuration management
//! - Metrics

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod schemas;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the API root
pub const SERVICE_NAME: &str = "PaperCheck DB API";
