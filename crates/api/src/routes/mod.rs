pub mod calculations;
pub mod dashboard;
pub mod health;
pub mod models;
pub mod reference;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /reference/regions                 grid regions
/// /reference/gpus                    GPU profiles
/// /reference/settings-defaults       default PUE / WUE / weights
///
/// /models                            list, create custom
/// /models/{id}                       get, update, delete (id or slug)
///
/// /calculate                         footprint + EcoScore (POST)
/// /ecoscore                          EcoScore only (POST)
/// /compare                           multi-model comparison (POST)
/// /scenarios/compare                 baseline vs proposed (POST)
///
/// /dashboard/summary                 windowed usage totals
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reference", reference::router())
        .nest("/models", models::router())
        .nest("/dashboard", dashboard::router())
        .merge(calculations::router())
}
