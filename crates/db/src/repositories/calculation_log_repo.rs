//! Repository for the `calculation_logs` table.

use ecoscore_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::calculation_log::{CalculationLog, NewCalculationLog, UsageRow};

const COLUMNS: &str = "id, organization_id, model_id, region_id, request_count, \
    avg_tokens_per_request, total_tokens, energy_kwh, co2e_grams, water_liters, \
    hardware_amortized_grams, eco_score, eco_grade, pue_factor, wue_factor, calculated_at, \
    created_at, updated_at";

/// Append-only access to the calculation audit log.
pub struct CalculationLogRepo;

impl CalculationLogRepo {
    /// Append a calculation, stamped with the current time.
    pub async fn create(
        pool: &PgPool,
        input: &NewCalculationLog,
    ) -> Result<CalculationLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO calculation_logs (organization_id, model_id, region_id, request_count,
                 avg_tokens_per_request, total_tokens, energy_kwh, co2e_grams, water_liters,
                 hardware_amortized_grams, eco_score, eco_grade, pue_factor, wue_factor)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalculationLog>(&query)
            .bind(input.organization_id)
            .bind(input.model_id)
            .bind(&input.region_id)
            .bind(input.request_count)
            .bind(input.avg_tokens_per_request)
            .bind(input.total_tokens)
            .bind(input.energy_kwh)
            .bind(input.co2e_grams)
            .bind(input.water_liters)
            .bind(input.hardware_amortized_grams)
            .bind(input.eco_score)
            .bind(&input.eco_grade)
            .bind(input.pue_factor)
            .bind(input.wue_factor)
            .fetch_one(pool)
            .await
    }

    /// Log rows for an organization with `calculated_at` in `[start, end)`,
    /// oldest first, joined with the model's display name.
    pub async fn list_usage(
        pool: &PgPool,
        organization_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<UsageRow>, sqlx::Error> {
        sqlx::query_as::<_, UsageRow>(
            "SELECT l.model_id, m.display_name, l.region_id, l.request_count, l.total_tokens,
                    l.energy_kwh, l.co2e_grams, l.water_liters, l.hardware_amortized_grams,
                    l.eco_score, l.calculated_at
             FROM calculation_logs l
             JOIN ai_models m ON m.id = l.model_id
             WHERE l.organization_id = $1 AND l.calculated_at >= $2 AND l.calculated_at < $3
             ORDER BY l.calculated_at, l.id",
        )
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }
}
