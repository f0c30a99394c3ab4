//! Handlers for listing predefined models and managing custom ones.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ecoscore_core::error::CoreError;
use ecoscore_db::models::ai_model::{AiModel, CreateCustomModel, ModelListFilter, UpdateCustomModel};
use ecoscore_db::repositories::{AiModelRepo, GpuProfileRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Prefix of server-generated custom model slugs.
const CUSTOM_SLUG_PREFIX: &str = "custom-";
/// Hex characters taken from a random UUID for the slug suffix.
const CUSTOM_SLUG_HEX_LEN: usize = 12;

#[derive(Debug, Serialize)]
pub struct ModelList {
    pub models: Vec<AiModel>,
    pub total: usize,
    pub predefined_count: usize,
    pub custom_count: usize,
}

/// Generate a fresh `custom-<12 hex>` slug.
pub fn generate_custom_slug() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{CUSTOM_SLUG_PREFIX}{}", &hex[..CUSTOM_SLUG_HEX_LEN])
}

/// Load an active model by id or slug, or fail with 404.
async fn find_model(state: &AppState, id_or_slug: &str) -> AppResult<AiModel> {
    AiModelRepo::find_active(&state.pool, id_or_slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Model", id_or_slug)))
}

/// Reject edits to predefined models.
fn ensure_custom(model: &AiModel) -> AppResult<()> {
    if model.is_predefined {
        return Err(AppError::Core(CoreError::Forbidden(
            "Predefined models cannot be modified".into(),
        )));
    }
    Ok(())
}

/// Reject a `default_gpu` that is not in the reference table.
async fn ensure_gpu_exists(state: &AppState, sku: &str) -> AppResult<()> {
    if GpuProfileRepo::find_by_sku(&state.pool, sku).await?.is_none() {
        return Err(AppError::Core(CoreError::InvalidInput(format!(
            "Unknown GPU: {sku}"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /models
// ---------------------------------------------------------------------------

pub async fn list_models(
    State(state): State<AppState>,
    Query(filter): Query<ModelListFilter>,
) -> AppResult<impl IntoResponse> {
    let models = AiModelRepo::list(&state.pool, &filter).await?;
    let predefined_count = models.iter().filter(|m| m.is_predefined).count();
    let list = ModelList {
        total: models.len(),
        predefined_count,
        custom_count: models.len() - predefined_count,
        models,
    };
    Ok(Json(DataResponse { data: list }))
}

// ---------------------------------------------------------------------------
// GET /models/{id}
// ---------------------------------------------------------------------------

pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let model = find_model(&state, &id).await?;
    Ok(Json(DataResponse { data: model }))
}

// ---------------------------------------------------------------------------
// POST /models
// ---------------------------------------------------------------------------

pub async fn create_model(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomModel>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;
    ensure_gpu_exists(&state, &input.default_gpu).await?;

    let organization_id = state.organization_id().await?;
    let slug = generate_custom_slug();
    let created = AiModelRepo::create_custom(&state.pool, organization_id, &slug, &input).await?;

    tracing::info!(model_id = created.id, slug = %created.slug, "Custom model created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /models/{id}
// ---------------------------------------------------------------------------

pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCustomModel>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;

    let model = find_model(&state, &id).await?;
    ensure_custom(&model)?;
    if let Some(sku) = &input.default_gpu {
        ensure_gpu_exists(&state, sku).await?;
    }

    let updated = AiModelRepo::update_custom(&state.pool, model.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Model", &id)))?;

    tracing::info!(model_id = updated.id, "Custom model updated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /models/{id}
// ---------------------------------------------------------------------------

pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let model = find_model(&state, &id).await?;
    ensure_custom(&model)?;

    if !AiModelRepo::soft_delete(&state.pool, model.id).await? {
        return Err(AppError::Core(CoreError::not_found("Model", &id)));
    }

    tracing::info!(model_id = model.id, "Custom model deactivated");
    Ok(StatusCode::NO_CONTENT)
}
