//! Health check endpoint.
//!
//! Reports `ok` once the catalog is reachable and has briefs to start a game
//! with, `degraded` while it is empty, and 503 when the store cannot be read.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` or `unavailable`.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of briefs a game can start from.
    pub briefs: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, briefs) = match state.catalog.briefs.find_all().await {
        Ok(briefs) if briefs.is_empty() => (StatusCode::OK, "degraded", 0),
        Ok(briefs) => (StatusCode::OK, "ok", briefs.len()),
        Err(e) => {
            warn!(error = %e, "catalog unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", 0)
        }
    };
    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            briefs,
        }),
    )
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
