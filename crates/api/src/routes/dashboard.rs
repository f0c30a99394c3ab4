use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary?days=N   -> usage_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(dashboard::usage_summary))
}
