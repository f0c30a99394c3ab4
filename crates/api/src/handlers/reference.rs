//! Handlers for read-only reference data.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ecoscore_core::config::EcoScoreWeights;
use ecoscore_db::repositories::{GpuProfileRepo, GridIntensityRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Defaults applied when a calculation omits its overrides.
#[derive(Debug, Serialize)]
pub struct SettingsDefaults {
    pub default_pue: f64,
    pub default_wue: f64,
    pub ecoscore_weights: EcoScoreWeights,
}

// ---------------------------------------------------------------------------
// GET /reference/regions
// ---------------------------------------------------------------------------

pub async fn list_regions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let regions = GridIntensityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: regions }))
}

// ---------------------------------------------------------------------------
// GET /reference/gpus
// ---------------------------------------------------------------------------

pub async fn list_gpus(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let gpus = GpuProfileRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: gpus }))
}

// ---------------------------------------------------------------------------
// GET /reference/settings-defaults
// ---------------------------------------------------------------------------

pub async fn settings_defaults(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: SettingsDefaults {
            default_pue: state.engine.default_pue,
            default_wue: state.engine.default_wue_liters_per_kwh,
            ecoscore_weights: state.engine.default_weights,
        },
    })
}
