//! Route definitions for model profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// Routes mounted at `/models`.
///
/// ```text
/// GET    /        -> list_models
/// POST   /        -> create_model
/// GET    /{id}    -> get_model
/// PUT    /{id}    -> update_model
/// DELETE /{id}    -> delete_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(models::list_models).post(models::create_model))
        .route(
            "/{id}",
            get(models::get_model)
                .put(models::update_model)
                .delete(models::delete_model),
        )
}
