//! Repository for the `ai_models` table.

use ecoscore_core::profile::ModelCategory;
use ecoscore_core::types::DbId;
use sqlx::PgPool;

use crate::models::ai_model::{
    AiModel, CreateCustomModel, ModelListFilter, UpdateCustomModel, UpsertPredefinedModel,
};

const COLUMNS: &str = "id, slug, display_name, family, category, parameters_billion, \
    energy_per_million_tokens_kwh, default_gpu, gpu_count_inference, tokens_per_second_per_gpu, \
    quality_score, training_energy_mwh, training_co2e_tons, description, is_predefined, \
    is_active, organization_id, created_at, updated_at";

/// Provides queries and custom-model CRUD for AI model profiles.
pub struct AiModelRepo;

impl AiModelRepo {
    /// List active models, predefined first, then by parameter count
    /// descending.
    ///
    /// The predefined/custom flags only narrow the result when exactly one
    /// of them is set.
    pub async fn list(pool: &PgPool, filter: &ModelListFilter) -> Result<Vec<AiModel>, sqlx::Error> {
        let predefined = match (filter.include_predefined, filter.include_custom) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        };
        let query = format!(
            "SELECT {COLUMNS} FROM ai_models
             WHERE is_active
               AND ($1::text IS NULL OR category = $1)
               AND ($2::boolean IS NULL OR is_predefined = $2)
             ORDER BY is_predefined DESC, parameters_billion DESC, id"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(filter.category.map(ModelCategory::as_str))
            .bind(predefined)
            .fetch_all(pool)
            .await
    }

    /// Find an active model by numeric id (as text) or slug.
    pub async fn find_active(
        pool: &PgPool,
        id_or_slug: &str,
    ) -> Result<Option<AiModel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_models
             WHERE is_active AND (id::text = $1 OR slug = $1)"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(id_or_slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a custom model owned by `organization_id`.
    pub async fn create_custom(
        pool: &PgPool,
        organization_id: DbId,
        slug: &str,
        input: &CreateCustomModel,
    ) -> Result<AiModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_models (slug, display_name, family, category, parameters_billion,
                 energy_per_million_tokens_kwh, default_gpu, gpu_count_inference,
                 tokens_per_second_per_gpu, quality_score, description, is_predefined,
                 organization_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, false, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(slug)
            .bind(&input.display_name)
            .bind(&input.family)
            .bind(input.category.as_str())
            .bind(input.parameters_billion)
            .bind(input.energy_per_million_tokens_kwh)
            .bind(&input.default_gpu)
            .bind(input.gpu_count_inference)
            .bind(input.tokens_per_second_per_gpu)
            .bind(input.quality_score)
            .bind(&input.description)
            .bind(organization_id)
            .fetch_one(pool)
            .await
    }

    /// Patch an active custom model. Only non-`None` fields are applied.
    ///
    /// Returns `None` when no active custom model has that id; predefined
    /// rows are never touched.
    pub async fn update_custom(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomModel,
    ) -> Result<Option<AiModel>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_models SET
                display_name = COALESCE($2, display_name),
                category = COALESCE($3, category),
                parameters_billion = COALESCE($4, parameters_billion),
                energy_per_million_tokens_kwh = COALESCE($5, energy_per_million_tokens_kwh),
                default_gpu = COALESCE($6, default_gpu),
                gpu_count_inference = COALESCE($7, gpu_count_inference),
                tokens_per_second_per_gpu = COALESCE($8, tokens_per_second_per_gpu),
                quality_score = COALESCE($9, quality_score),
                description = COALESCE($10, description)
             WHERE id = $1 AND is_predefined = false AND is_active
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(input.category.map(ModelCategory::as_str))
            .bind(input.parameters_billion)
            .bind(input.energy_per_million_tokens_kwh)
            .bind(&input.default_gpu)
            .bind(input.gpu_count_inference)
            .bind(input.tokens_per_second_per_gpu)
            .bind(input.quality_score)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a custom model. Returns `true` if a row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ai_models SET is_active = false
             WHERE id = $1 AND is_predefined = false AND is_active",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a predefined model or refresh the one with the same slug.
    /// The active flag of an existing row is preserved.
    pub async fn upsert_predefined(
        pool: &PgPool,
        input: &UpsertPredefinedModel,
    ) -> Result<AiModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_models (slug, display_name, family, category, parameters_billion,
                 energy_per_million_tokens_kwh, default_gpu, gpu_count_inference,
                 tokens_per_second_per_gpu, quality_score, training_energy_mwh,
                 training_co2e_tons, description, is_predefined)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, true)
             ON CONFLICT (slug) DO UPDATE SET
                 display_name = EXCLUDED.display_name,
                 family = EXCLUDED.family,
                 category = EXCLUDED.category,
                 parameters_billion = EXCLUDED.parameters_billion,
                 energy_per_million_tokens_kwh = EXCLUDED.energy_per_million_tokens_kwh,
                 default_gpu = EXCLUDED.default_gpu,
                 gpu_count_inference = EXCLUDED.gpu_count_inference,
                 tokens_per_second_per_gpu = EXCLUDED.tokens_per_second_per_gpu,
                 quality_score = EXCLUDED.quality_score,
                 training_energy_mwh = EXCLUDED.training_energy_mwh,
                 training_co2e_tons = EXCLUDED.training_co2e_tons,
                 description = EXCLUDED.description,
                 is_predefined = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiModel>(&query)
            .bind(&input.slug)
            .bind(&input.display_name)
            .bind(&input.family)
            .bind(input.category.as_str())
            .bind(input.parameters_billion)
            .bind(input.energy_per_million_tokens_kwh)
            .bind(&input.default_gpu)
            .bind(input.gpu_count_inference)
            .bind(input.tokens_per_second_per_gpu)
            .bind(input.quality_score)
            .bind(input.training_energy_mwh)
            .bind(input.training_co2e_tons)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }
}
