//! Route definitions for read-only reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Routes mounted at `/reference`.
///
/// ```text
/// GET /regions             -> list_regions
/// GET /gpus                -> list_gpus
/// GET /settings-defaults   -> settings_defaults
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regions", get(reference::list_regions))
        .route("/gpus", get(reference::list_gpus))
        .route("/settings-defaults", get(reference::settings_defaults))
}
