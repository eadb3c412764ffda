//! Service root

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use papercheck_common::{SERVICE_NAME, VERSION};

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub environment: String,
}

/// Service name, version and deployment environment
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME,
        version: VERSION,
        environment: state.config.environment.clone(),
    })
}
