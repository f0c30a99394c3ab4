//! Loads the reference catalog the engine calculates against.

use ecoscore_core::catalog::InMemoryCatalog;
use sqlx::PgPool;

use super::{AiModelRepo, GpuProfileRepo, GridIntensityRepo};
use crate::models::ai_model::ModelListFilter;
use crate::models::decode_error;

/// Builds [`InMemoryCatalog`] snapshots from the database.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Snapshot every GPU, every grid region and all active models.
    ///
    /// A row the engine cannot represent fails the load with
    /// `sqlx::Error::Decode`.
    pub async fn load_snapshot(pool: &PgPool) -> Result<InMemoryCatalog, sqlx::Error> {
        let mut catalog = InMemoryCatalog::new();

        for row in GpuProfileRepo::list(pool).await? {
            catalog.insert_gpu(row.to_profile().map_err(decode_error)?);
        }
        for row in GridIntensityRepo::list(pool).await? {
            catalog.insert_grid(row.to_profile().map_err(decode_error)?);
        }
        for row in AiModelRepo::list(pool, &ModelListFilter::default()).await? {
            catalog.insert_model(row.to_profile().map_err(decode_error)?);
        }

        tracing::debug!(
            gpus = catalog.gpus().count(),
            grids = catalog.grids().count(),
            models = catalog.active_models().count(),
            "Catalog snapshot loaded"
        );
        Ok(catalog)
    }
}
