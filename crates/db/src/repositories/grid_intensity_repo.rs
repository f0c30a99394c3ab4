//! Repository for the `grid_carbon_intensities` table.

use sqlx::PgPool;

use crate::models::grid_intensity::{GridIntensityRow, UpsertGridIntensity};

const COLUMNS: &str = "id, region_id, provider, location, gco2e_per_kwh, source, year, \
    renewable_percentage, created_at, updated_at";

/// Provides reads and seeding upserts for grid carbon intensity data.
pub struct GridIntensityRepo;

impl GridIntensityRepo {
    /// List every region, cleanest grid first.
    pub async fn list(pool: &PgPool) -> Result<Vec<GridIntensityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grid_carbon_intensities ORDER BY gco2e_per_kwh, region_id"
        );
        sqlx::query_as::<_, GridIntensityRow>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_region(
        pool: &PgPool,
        region_id: &str,
    ) -> Result<Option<GridIntensityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grid_carbon_intensities WHERE region_id = $1");
        sqlx::query_as::<_, GridIntensityRow>(&query)
            .bind(region_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a region or overwrite the one with the same `region_id`.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertGridIntensity,
    ) -> Result<GridIntensityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO grid_carbon_intensities
                 (region_id, provider, location, gco2e_per_kwh, source, year, renewable_percentage)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (region_id) DO UPDATE SET
                 provider = EXCLUDED.provider,
                 location = EXCLUDED.location,
                 gco2e_per_kwh = EXCLUDED.gco2e_per_kwh,
                 source = EXCLUDED.source,
                 year = EXCLUDED.year,
                 renewable_percentage = EXCLUDED.renewable_percentage
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GridIntensityRow>(&query)
            .bind(&input.region_id)
            .bind(&input.provider)
            .bind(&input.location)
            .bind(input.gco2e_per_kwh)
            .bind(&input.source)
            .bind(input.year)
            .bind(input.renewable_percentage)
            .fetch_one(pool)
            .await
    }
}
