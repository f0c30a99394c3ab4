//! GPU hardware reference model.

use ecoscore_core::error::CoreError;
use ecoscore_core::profile::GpuProfile;
use ecoscore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::narrow;

/// A row from the `gpu_profiles` table. `sku` is the stable identifier
/// models reference as their default GPU.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GpuProfileRow {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub tdp_watts: i32,
    pub typical_utilization: f64,
    pub memory_gb: i32,
    pub flops_teraflops: i32,
    pub embodied_carbon_kg_co2e: f64,
    pub expected_lifespan_hours: i32,
    pub water_cooling_liters_per_hour: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GpuProfileRow {
    /// Convert into the engine's profile, keyed by `sku`.
    pub fn to_profile(&self) -> Result<GpuProfile, CoreError> {
        Ok(GpuProfile {
            id: self.sku.clone(),
            name: self.name.clone(),
            tdp_watts: narrow(self.tdp_watts, "tdp_watts")?,
            typical_utilization: self.typical_utilization,
            memory_gb: narrow(self.memory_gb, "memory_gb")?,
            flops_teraflops: narrow(self.flops_teraflops, "flops_teraflops")?,
            embodied_carbon_kg_co2e: self.embodied_carbon_kg_co2e,
            expected_lifespan_hours: narrow(
                self.expected_lifespan_hours,
                "expected_lifespan_hours",
            )?,
            water_cooling_liters_per_hour: self.water_cooling_liters_per_hour,
        })
    }
}

/// Values written when seeding or refreshing a GPU profile.
#[derive(Debug, Clone)]
pub struct UpsertGpuProfile {
    pub sku: String,
    pub name: String,
    pub tdp_watts: i32,
    pub typical_utilization: f64,
    pub memory_gb: i32,
    pub flops_teraflops: i32,
    pub embodied_carbon_kg_co2e: f64,
    pub expected_lifespan_hours: i32,
    pub water_cooling_liters_per_hour: f64,
}

impl TryFrom<&GpuProfile> for UpsertGpuProfile {
    type Error = CoreError;

    fn try_from(gpu: &GpuProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            sku: gpu.id.clone(),
            name: gpu.name.clone(),
            tdp_watts: narrow(gpu.tdp_watts, "tdp_watts")?,
            typical_utilization: gpu.typical_utilization,
            memory_gb: narrow(gpu.memory_gb, "memory_gb")?,
            flops_teraflops: narrow(gpu.flops_teraflops, "flops_teraflops")?,
            embodied_carbon_kg_co2e: gpu.embodied_carbon_kg_co2e,
            expected_lifespan_hours: narrow(
                gpu.expected_lifespan_hours,
                "expected_lifespan_hours",
            )?,
            water_cooling_liters_per_hour: gpu.water_cooling_liters_per_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn row(tdp_watts: i32) -> GpuProfileRow {
        GpuProfileRow {
            id: 1,
            sku: "nvidia-t4".to_string(),
            name: "NVIDIA T4".to_string(),
            tdp_watts,
            typical_utilization: 0.6,
            memory_gb: 16,
            flops_teraflops: 65,
            embodied_carbon_kg_co2e: 50.0,
            expected_lifespan_hours: 35_000,
            water_cooling_liters_per_hour: 0.4,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn profile_is_keyed_by_sku() {
        let profile = row(70).to_profile().unwrap();
        assert_eq!(profile.id, "nvidia-t4");
        assert_eq!(profile.tdp_watts, 70);
    }

    #[test]
    fn negative_column_is_rejected() {
        assert_matches!(row(-1).to_profile(), Err(CoreError::InvalidInput(msg)) if msg.contains("tdp_watts"));
    }
}
