//! Organization entity model.

use ecoscore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Owner of custom models and calculation logs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
