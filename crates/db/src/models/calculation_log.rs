//! Calculation audit log entity and the usage view read back by the
//! dashboard.

use ecoscore_core::error::CoreError;
use ecoscore_core::summary::UsageRecord;
use ecoscore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::narrow;

/// A row from the `calculation_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CalculationLog {
    pub id: DbId,
    pub organization_id: DbId,
    pub model_id: DbId,
    pub region_id: String,
    pub request_count: i64,
    pub avg_tokens_per_request: i64,
    pub total_tokens: i64,
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub eco_score: Option<f64>,
    pub eco_grade: Option<String>,
    pub pue_factor: Option<f64>,
    pub wue_factor: Option<f64>,
    pub calculated_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a calculation to the log.
#[derive(Debug, Clone)]
pub struct NewCalculationLog {
    pub organization_id: DbId,
    pub model_id: DbId,
    pub region_id: String,
    pub request_count: i64,
    pub avg_tokens_per_request: i64,
    pub total_tokens: i64,
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub eco_score: Option<f64>,
    pub eco_grade: Option<String>,
    pub pue_factor: Option<f64>,
    pub wue_factor: Option<f64>,
}

/// A log row joined with its model's display name.
#[derive(Debug, Clone, FromRow)]
pub struct UsageRow {
    pub model_id: DbId,
    pub display_name: String,
    pub region_id: String,
    pub request_count: i64,
    pub total_tokens: i64,
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub eco_score: Option<f64>,
    pub calculated_at: Timestamp,
}

impl UsageRow {
    pub fn into_record(self) -> Result<UsageRecord, CoreError> {
        Ok(UsageRecord {
            model_id: self.model_id.to_string(),
            model_name: self.display_name,
            region_id: self.region_id,
            request_count: narrow(self.request_count, "request_count")?,
            total_tokens: narrow(self.total_tokens, "total_tokens")?,
            energy_kwh: self.energy_kwh,
            co2e_grams: self.co2e_grams,
            water_liters: self.water_liters,
            hardware_amortized_grams: self.hardware_amortized_grams,
            eco_score: self.eco_score,
            calculated_at: self.calculated_at,
        })
    }
}
