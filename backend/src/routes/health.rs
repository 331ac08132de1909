//! Health check endpoints
//!
//! - /health: process is up, with version
//! - /health/ready: database reachable (503 otherwise)
//! - /health/live: always OK while the server runs

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseStatus>,
}

impl HealthResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            database: None,
        }
    }
}

/// Database reachability and pool usage
#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub reachable: bool,
    pub pool_size: u32,
    pub max_connections: u32,
    pub idle_connections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("healthy"))
}

/// Readiness probe: 503 while the database cannot be reached
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let pool = state.db();
    let result = db::health_check(pool).await;

    let error = match result {
        Ok(()) => None,
        Err(e) => {
            error!(error = %e, "Readiness check failed");
            Some("database unreachable".to_string())
        }
    };

    let database = DatabaseStatus {
        reachable: error.is_none(),
        pool_size: pool.size(),
        max_connections: state.config().database.max_connections,
        idle_connections: pool.num_idle(),
        error,
    };

    let (status, label) = if database.reachable {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            version: VERSION,
            database: Some(database),
        }),
    )
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("alive"))
}
