//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::AppState;
use papercheck_common::{metrics, AppError};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness check backed by a `SELECT 1`. A database failure is reported in
/// the body; the response status stays 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.db.ping().await {
        Ok(()) => HealthResponse {
            status: "healthy",
            database: "connected",
            error: None,
        },
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            HealthResponse {
                status: "unhealthy",
                database: "error",
                error: Some(match e {
                    AppError::DatabaseConnection { message } => message,
                    other => other.to_string(),
                }),
            }
        }
    };

    metrics::record_health_check(response.error.is_none());
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_healthy_when_ping_succeeds() {
        let state = test_state(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ]));

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
        assert!(body.error.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": "healthy", "database": "connected"}));
    }

    #[tokio::test]
    async fn test_unhealthy_reports_error() {
        let state = test_state(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_errors([DbErr::Custom("connection refused".to_string())]),
        );

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "unhealthy");
        assert_eq!(body.database, "error");
        let error = body.error.unwrap();
        assert!(error.contains("connection refused"));
        assert!(!error.starts_with("Database connection error"));
    }
}
