//! Route definitions for footprint, EcoScore and comparison endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::calculation;
use crate::state::AppState;

/// Calculation routes, merged directly under `/api/v1`.
///
/// ```text
/// POST /calculate           -> calculate
/// POST /ecoscore            -> eco_score
/// POST /compare             -> compare_models
/// POST /scenarios/compare   -> compare_scenarios
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculation::calculate))
        .route("/ecoscore", post(calculation::eco_score))
        .route("/compare", post(calculation::compare_models))
        .route("/scenarios/compare", post(calculation::compare_scenarios))
}
