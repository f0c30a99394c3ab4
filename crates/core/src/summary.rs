//! Windowed usage aggregation over stored calculations.
//!
//! Totals and simple averages only; no trend detection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::round_to;
use crate::types::Timestamp;

/// One stored calculation, as read back from the audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub model_id: String,
    pub model_name: String,
    pub region_id: String,
    pub request_count: u64,
    pub total_tokens: u64,
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub eco_score: Option<f64>,
    pub calculated_at: Timestamp,
}

/// Per-model slice of a [`UsageSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelUsage {
    pub model_id: String,
    pub display_name: String,
    pub calculations: u64,
    pub requests: u64,
    pub co2e_kg: f64,
    pub average_eco_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub period_start: Timestamp,
    pub period_end: Timestamp,
    pub calculation_count: u64,
    pub total_requests: u64,
    pub total_tokens: u64,
    pub total_energy_kwh: f64,
    pub total_co2e_kg: f64,
    pub total_water_liters: f64,
    pub total_hardware_grams: f64,
    /// Mean over records that carry a score, one decimal.
    pub average_eco_score: Option<f64>,
    /// Highest CO2e first.
    pub models: Vec<ModelUsage>,
}

#[derive(Default)]
struct ScoreMean {
    sum: f64,
    count: u64,
}

impl ScoreMean {
    fn add(&mut self, score: Option<f64>) {
        if let Some(score) = score {
            self.sum += score;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| round_to(self.sum / self.count as f64, 1))
    }
}

struct ModelAccumulator {
    display_name: String,
    calculations: u64,
    requests: u64,
    co2e_grams: f64,
    score: ScoreMean,
}

/// Aggregate the records whose `calculated_at` falls in
/// `[period_start, period_end)`. Records outside the window are ignored.
pub fn summarize_usage(
    records: &[UsageRecord],
    period_start: Timestamp,
    period_end: Timestamp,
) -> UsageSummary {
    let mut summary = UsageSummary {
        period_start,
        period_end,
        calculation_count: 0,
        total_requests: 0,
        total_tokens: 0,
        total_energy_kwh: 0.0,
        total_co2e_kg: 0.0,
        total_water_liters: 0.0,
        total_hardware_grams: 0.0,
        average_eco_score: None,
        models: Vec::new(),
    };
    let mut score = ScoreMean::default();
    let mut per_model: BTreeMap<&str, ModelAccumulator> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|r| r.calculated_at >= period_start && r.calculated_at < period_end)
    {
        summary.calculation_count += 1;
        summary.total_requests = summary.total_requests.saturating_add(record.request_count);
        summary.total_tokens = summary.total_tokens.saturating_add(record.total_tokens);
        summary.total_energy_kwh += record.energy_kwh;
        summary.total_co2e_kg += record.co2e_grams / 1000.0;
        summary.total_water_liters += record.water_liters;
        summary.total_hardware_grams += record.hardware_amortized_grams;
        score.add(record.eco_score);

        let entry = per_model
            .entry(record.model_id.as_str())
            .or_insert_with(|| ModelAccumulator {
                display_name: record.model_name.clone(),
                calculations: 0,
                requests: 0,
                co2e_grams: 0.0,
                score: ScoreMean::default(),
            });
        entry.calculations += 1;
        entry.requests = entry.requests.saturating_add(record.request_count);
        entry.co2e_grams += record.co2e_grams;
        entry.score.add(record.eco_score);
    }

    summary.average_eco_score = score.value();
    summary.models = per_model
        .into_iter()
        .map(|(model_id, acc)| ModelUsage {
            model_id: model_id.to_string(),
            display_name: acc.display_name,
            calculations: acc.calculations,
            requests: acc.requests,
            co2e_kg: acc.co2e_grams / 1000.0,
            average_eco_score: acc.score.value(),
        })
        .collect();
    summary
        .models
        .sort_by(|a, b| b.co2e_kg.total_cmp(&a.co2e_kg));
    summary
}
