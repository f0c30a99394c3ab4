//! Handler for the usage dashboard summary.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use ecoscore_core::summary::summarize_usage;
use ecoscore_db::repositories::CalculationLogRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn default_days() -> i64 {
    30
}

/// Query parameters for `GET /dashboard/summary`.
#[derive(Debug, Deserialize, Validate)]
pub struct SummaryParams {
    /// Window length ending now.
    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 365))]
    pub days: i64,
}

// ---------------------------------------------------------------------------
// GET /dashboard/summary
// ---------------------------------------------------------------------------

pub async fn usage_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;

    let period_end = Utc::now();
    let period_start = period_end - Duration::days(params.days);
    let organization_id = state.organization_id().await?;

    let records = CalculationLogRepo::list_usage(&state.pool, organization_id, period_start, period_end)
        .await?
        .into_iter()
        .map(|row| row.into_record())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let summary = summarize_usage(&records, period_start, period_end);
    Ok(Json(DataResponse { data: summary }))
}
