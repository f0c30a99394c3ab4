//! Idempotent reference-data seeding.
//!
//! Writes the built-in GPU, grid and model profiles. Re-running refreshes
//! their figures in place; custom models and logs are never touched.

use ecoscore_core::reference;
use sqlx::PgPool;

use crate::models::ai_model::UpsertPredefinedModel;
use crate::models::decode_error;
use crate::models::gpu_profile::UpsertGpuProfile;
use crate::models::grid_intensity::UpsertGridIntensity;
use crate::models::organization::Organization;
use crate::repositories::{AiModelRepo, GpuProfileRepo, GridIntensityRepo, OrganizationRepo};

/// Display name given to an organization created during seeding.
pub const DEFAULT_ORG_NAME: &str = "Default Organization";

/// Counts of rows written by [`seed_reference_data`].
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub organization: Organization,
    pub gpus: usize,
    pub grids: usize,
    pub models: usize,
}

/// Ensure the organization `org_slug` exists and upsert every built-in
/// reference profile. GPUs are written first since models reference them.
pub async fn seed_reference_data(pool: &PgPool, org_slug: &str) -> Result<SeedSummary, sqlx::Error> {
    let organization = OrganizationRepo::ensure(pool, org_slug, DEFAULT_ORG_NAME).await?;

    let gpus = reference::predefined_gpus();
    for gpu in &gpus {
        let input = UpsertGpuProfile::try_from(gpu).map_err(decode_error)?;
        GpuProfileRepo::upsert(pool, &input).await?;
    }

    let grids = reference::predefined_grids();
    for grid in &grids {
        GridIntensityRepo::upsert(pool, &UpsertGridIntensity::from(grid)).await?;
    }

    let models = reference::predefined_models();
    for model in &models {
        let input = UpsertPredefinedModel::try_from(model).map_err(decode_error)?;
        AiModelRepo::upsert_predefined(pool, &input).await?;
    }

    tracing::info!(
        org = %organization.slug,
        gpus = gpus.len(),
        grids = grids.len(),
        models = models.len(),
        "Reference data seeded"
    );

    Ok(SeedSummary {
        organization,
        gpus: gpus.len(),
        grids: grids.len(),
        models: models.len(),
    })
}
