//! Handlers for footprint calculation, EcoScore, model comparison and
//! scenario comparison.
//!
//! Each request snapshots the reference catalog from the database and runs
//! the synchronous engine against it.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ecoscore_core::calculation::{Calculation, CalculationRequest};
use ecoscore_core::calculator::Calculator;
use ecoscore_core::comparison::{
    ComparisonRequest, DEFAULT_AVG_TOKENS_PER_REQUEST, DEFAULT_REQUESTS_PER_BATCH,
};
use ecoscore_core::config::EcoScoreWeights;
use ecoscore_core::types::DbId;
use ecoscore_db::models::calculation_log::NewCalculationLog;
use ecoscore_db::repositories::CalculationLogRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One workload: model, region, volume and optional overrides.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScenarioInput {
    pub model_id: String,
    pub region_id: String,
    #[validate(range(min = 1))]
    pub request_count: u64,
    #[validate(range(min = 1))]
    pub avg_tokens_per_request: u64,
    pub gpu_override: Option<String>,
    #[validate(range(min = 1.0, max = 3.0))]
    pub pue: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub wue: Option<f64>,
    pub weights: Option<EcoScoreWeights>,
}

impl ScenarioInput {
    fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            model_id: self.model_id.clone(),
            region_id: self.region_id.clone(),
            request_count: self.request_count,
            avg_tokens_per_request: self.avg_tokens_per_request,
            gpu_override: self.gpu_override.clone(),
            pue: self.pue,
            wue: self.wue,
            weights: self.weights,
        }
    }
}

fn default_persist() -> bool {
    true
}

/// Request body for `POST /calculate`.
#[derive(Debug, Deserialize, Validate)]
pub struct CalculateRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub scenario: ScenarioInput,
    /// Record the result in the calculation log.
    #[serde(default = "default_persist")]
    pub persist: bool,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub calculation: Calculation,
    /// Log row id, present when the calculation was persisted.
    pub calculation_id: Option<DbId>,
}

/// Request body for `POST /ecoscore`.
#[derive(Debug, Deserialize)]
pub struct EcoScoreRequest {
    pub model_id: String,
    pub region_id: String,
    pub gpu_override: Option<String>,
    pub weights: Option<EcoScoreWeights>,
}

fn default_batch() -> u64 {
    DEFAULT_REQUESTS_PER_BATCH
}

fn default_avg_tokens() -> u64 {
    DEFAULT_AVG_TOKENS_PER_REQUEST
}

/// Request body for `POST /compare`.
#[derive(Debug, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 1))]
    pub model_ids: Vec<String>,
    pub region_id: String,
    #[serde(default = "default_batch", alias = "requests_per_1k")]
    #[validate(range(min = 1))]
    pub requests_per_batch: u64,
    #[serde(default = "default_avg_tokens")]
    #[validate(range(min = 1))]
    pub avg_tokens_per_request: u64,
    pub weights: Option<EcoScoreWeights>,
}

/// Request body for `POST /scenarios/compare`.
#[derive(Debug, Deserialize, Validate)]
pub struct ScenarioCompareRequest {
    #[validate(nested)]
    pub baseline: ScenarioInput,
    #[validate(nested)]
    pub proposed: ScenarioInput,
}

/// Parse the catalog's model id back into the row id it was built from.
fn model_row_id(profile_id: &str) -> AppResult<DbId> {
    profile_id
        .parse()
        .map_err(|_| AppError::InternalError(format!("Non-numeric model id in catalog: {profile_id}")))
}

fn to_column(value: u64, field: &str) -> AppResult<i64> {
    i64::try_from(value).map_err(|_| AppError::BadRequest(format!("{field} is too large")))
}

// ---------------------------------------------------------------------------
// POST /calculate
// ---------------------------------------------------------------------------

pub async fn calculate(
    State(state): State<AppState>,
    Json(input): Json<CalculateRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let request = input.scenario.to_request();

    let catalog = state.catalog().await?;
    let calculation = Calculator::new(&catalog, state.engine).calculate(&request)?;

    let calculation_id = if input.persist {
        let footprint = &calculation.footprint;
        let log = NewCalculationLog {
            organization_id: state.organization_id().await?,
            model_id: model_row_id(&footprint.model.id)?,
            region_id: footprint.grid.region_id.clone(),
            request_count: to_column(request.request_count, "request_count")?,
            avg_tokens_per_request: to_column(
                request.avg_tokens_per_request,
                "avg_tokens_per_request",
            )?,
            total_tokens: to_column(calculation.total_tokens, "total_tokens")?,
            energy_kwh: footprint.energy_kwh,
            co2e_grams: footprint.co2e_grams,
            water_liters: footprint.water_liters,
            hardware_amortized_grams: footprint.hardware_amortized_grams,
            eco_score: Some(calculation.eco_score.overall),
            eco_grade: Some(calculation.eco_score.grade.to_string()),
            pue_factor: request.pue,
            wue_factor: request.wue,
        };
        let logged = CalculationLogRepo::create(&state.pool, &log).await?;
        tracing::info!(
            calculation_id = logged.id,
            model_id = logged.model_id,
            region_id = %logged.region_id,
            co2e_grams = logged.co2e_grams,
            "Calculation logged"
        );
        Some(logged.id)
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: CalculateResponse {
            calculation,
            calculation_id,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /ecoscore
// ---------------------------------------------------------------------------

pub async fn eco_score(
    State(state): State<AppState>,
    Json(input): Json<EcoScoreRequest>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog().await?;
    let result = Calculator::new(&catalog, state.engine).eco_score(
        &input.model_id,
        &input.region_id,
        input.weights.as_ref(),
        input.gpu_override.as_deref(),
    )?;
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /compare
// ---------------------------------------------------------------------------

pub async fn compare_models(
    State(state): State<AppState>,
    Json(input): Json<CompareRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let request = ComparisonRequest {
        model_ids: input.model_ids,
        region_id: input.region_id,
        requests_per_batch: input.requests_per_batch,
        avg_tokens_per_request: input.avg_tokens_per_request,
        weights: input.weights,
    };

    let catalog = state.catalog().await?;
    let result = Calculator::new(&catalog, state.engine).compare_models(&request)?;

    tracing::debug!(
        models = result.models.len(),
        best_overall = %result.recommendation.best_overall,
        "Models compared"
    );
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /scenarios/compare
// ---------------------------------------------------------------------------

pub async fn compare_scenarios(
    State(state): State<AppState>,
    Json(input): Json<ScenarioCompareRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let catalog = state.catalog().await?;
    let result = Calculator::new(&catalog, state.engine)
        .compare_scenarios(&input.baseline.to_request(), &input.proposed.to_request())?;
    Ok(Json(DataResponse { data: result }))
}
