//! Regional grid carbon intensity model.

use ecoscore_core::error::CoreError;
use ecoscore_core::profile::GridProfile;
use ecoscore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::narrow;

/// A row from the `grid_carbon_intensities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GridIntensityRow {
    pub id: DbId,
    pub region_id: String,
    pub provider: String,
    pub location: String,
    pub gco2e_per_kwh: f64,
    pub source: String,
    pub year: i32,
    pub renewable_percentage: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GridIntensityRow {
    pub fn to_profile(&self) -> Result<GridProfile, CoreError> {
        Ok(GridProfile {
            region_id: self.region_id.clone(),
            provider: self.provider.clone(),
            location: self.location.clone(),
            gco2e_per_kwh: self.gco2e_per_kwh,
            source: self.source.clone(),
            year: self.year,
            renewable_percentage: narrow(self.renewable_percentage, "renewable_percentage")?,
        })
    }
}

/// Values written when seeding or refreshing a grid region.
#[derive(Debug, Clone)]
pub struct UpsertGridIntensity {
    pub region_id: String,
    pub provider: String,
    pub location: String,
    pub gco2e_per_kwh: f64,
    pub source: String,
    pub year: i32,
    pub renewable_percentage: i16,
}

impl From<&GridProfile> for UpsertGridIntensity {
    fn from(grid: &GridProfile) -> Self {
        Self {
            region_id: grid.region_id.clone(),
            provider: grid.provider.clone(),
            location: grid.location.clone(),
            gco2e_per_kwh: grid.gco2e_per_kwh,
            source: grid.source.clone(),
            year: grid.year,
            renewable_percentage: i16::from(grid.renewable_percentage),
        }
    }
}
