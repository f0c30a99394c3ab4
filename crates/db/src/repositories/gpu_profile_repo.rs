//! Repository for the `gpu_profiles` table.

use sqlx::PgPool;

use crate::models::gpu_profile::{GpuProfileRow, UpsertGpuProfile};

const COLUMNS: &str = "id, sku, name, tdp_watts, typical_utilization, memory_gb, \
    flops_teraflops, embodied_carbon_kg_co2e, expected_lifespan_hours, \
    water_cooling_liters_per_hour, created_at, updated_at";

/// Provides reads and seeding upserts for GPU reference data.
pub struct GpuProfileRepo;

impl GpuProfileRepo {
    /// List every GPU profile ordered by SKU.
    pub async fn list(pool: &PgPool) -> Result<Vec<GpuProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gpu_profiles ORDER BY sku");
        sqlx::query_as::<_, GpuProfileRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_sku(pool: &PgPool, sku: &str) -> Result<Option<GpuProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gpu_profiles WHERE sku = $1");
        sqlx::query_as::<_, GpuProfileRow>(&query)
            .bind(sku)
            .fetch_optional(pool)
            .await
    }

    /// Insert a profile or overwrite the one with the same SKU.
    pub async fn upsert(pool: &PgPool, input: &UpsertGpuProfile) -> Result<GpuProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO gpu_profiles (sku, name, tdp_watts, typical_utilization, memory_gb,
                 flops_teraflops, embodied_carbon_kg_co2e, expected_lifespan_hours,
                 water_cooling_liters_per_hour)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (sku) DO UPDATE SET
                 name = EXCLUDED.name,
                 tdp_watts = EXCLUDED.tdp_watts,
                 typical_utilization = EXCLUDED.typical_utilization,
                 memory_gb = EXCLUDED.memory_gb,
                 flops_teraflops = EXCLUDED.flops_teraflops,
                 embodied_carbon_kg_co2e = EXCLUDED.embodied_carbon_kg_co2e,
                 expected_lifespan_hours = EXCLUDED.expected_lifespan_hours,
                 water_cooling_liters_per_hour = EXCLUDED.water_cooling_liters_per_hour
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GpuProfileRow>(&query)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(input.tdp_watts)
            .bind(input.typical_utilization)
            .bind(input.memory_gb)
            .bind(input.flops_teraflops)
            .bind(input.embodied_carbon_kg_co2e)
            .bind(input.expected_lifespan_hours)
            .bind(input.water_cooling_liters_per_hour)
            .fetch_one(pool)
            .await
    }
}
