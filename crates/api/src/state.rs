use std::sync::Arc;

use ecoscore_core::catalog::InMemoryCatalog;
use ecoscore_core::config::EngineConfig;
use ecoscore_core::types::DbId;
use ecoscore_db::repositories::{CatalogRepo, OrganizationRepo};
use ecoscore_db::seed::DEFAULT_ORG_NAME;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the pool and config are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ecoscore_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Constants handed to every calculator built for a request.
    pub engine: EngineConfig,
}

impl AppState {
    /// Snapshot the reference catalog for one request.
    pub async fn catalog(&self) -> Result<InMemoryCatalog, sqlx::Error> {
        CatalogRepo::load_snapshot(&self.pool).await
    }

    /// Id of the configured organization, created on first use.
    pub async fn organization_id(&self) -> Result<DbId, sqlx::Error> {
        let org =
            OrganizationRepo::ensure(&self.pool, &self.config.default_org_slug, DEFAULT_ORG_NAME)
                .await?;
        Ok(org.id)
    }
}
