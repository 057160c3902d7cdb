//! Liveness and readiness probes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// Routes mounted at the application root (not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Returns `ok` plus a database round-trip check.
async fn health(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    homegrid_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
