use axum::extract::State;
use axum::{routing::get, Json, Router};
use ecoscore_db::repositories::GridIntensityRepo;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when calculations cannot be served.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether grid intensities have been seeded. Every footprint needs one.
    pub reference_data_loaded: bool,
}

/// GET /health -- returns database and reference catalog health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = ecoscore_db::health_check(&state.pool).await.is_ok();
    let reference_data_loaded = db_healthy
        && GridIntensityRepo::list(&state.pool)
            .await
            .is_ok_and(|grids| !grids.is_empty());

    let status = if reference_data_loaded { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        reference_data_loaded,
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
