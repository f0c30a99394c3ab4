//! Baseline vs. proposed scenario comparison ("what if we moved region /
//! changed model / tuned PUE?").

use serde::Serialize;

use crate::calculation::{Calculation, CalculationRequest};
use crate::calculator::Calculator;
use crate::catalog::ReferenceCatalog;
use crate::error::CoreError;
use crate::format::round_to;
use crate::normalize::Grade;

/// Headline numbers of one calculated scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub model_id: String,
    pub region_id: String,
    pub request_count: u64,
    pub avg_tokens_per_request: u64,
    pub total_tokens: u64,
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub eco_score: f64,
    pub eco_grade: Grade,
}

impl ScenarioSummary {
    fn new(request: &CalculationRequest, calculation: &Calculation) -> Self {
        let footprint = &calculation.footprint;
        Self {
            model_id: request.model_id.clone(),
            region_id: request.region_id.clone(),
            request_count: request.request_count,
            avg_tokens_per_request: request.avg_tokens_per_request,
            total_tokens: calculation.total_tokens,
            energy_kwh: footprint.energy_kwh,
            co2e_grams: footprint.co2e_grams,
            water_liters: footprint.water_liters,
            hardware_amortized_grams: footprint.hardware_amortized_grams,
            eco_score: calculation.eco_score.overall,
            eco_grade: calculation.eco_score.grade,
        }
    }
}

/// Proposed relative to baseline. Percentages have two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioDelta {
    pub co2e_percent: f64,
    pub energy_percent: f64,
    pub water_percent: f64,
    pub eco_score_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub baseline: ScenarioSummary,
    pub proposed: ScenarioSummary,
    pub delta: ScenarioDelta,
}

/// `(new - old) / old` as a percentage with two decimals; 0 when `old` is 0.
pub fn percent_change(new: f64, old: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    round_to((new - old) / old * 100.0, 2)
}

impl<'a, C: ReferenceCatalog + ?Sized> Calculator<'a, C> {
    /// Calculate both scenarios and the change between them. Either
    /// scenario failing fails the whole comparison.
    pub fn compare_scenarios(
        &self,
        baseline: &CalculationRequest,
        proposed: &CalculationRequest,
    ) -> Result<ScenarioComparison, CoreError> {
        let baseline = ScenarioSummary::new(baseline, &self.calculate(baseline)?);
        let proposed = ScenarioSummary::new(proposed, &self.calculate(proposed)?);

        let delta = ScenarioDelta {
            co2e_percent: percent_change(proposed.co2e_grams, baseline.co2e_grams),
            energy_percent: percent_change(proposed.energy_kwh, baseline.energy_kwh),
            water_percent: percent_change(proposed.water_liters, baseline.water_liters),
            eco_score_delta: round_to(proposed.eco_score - baseline.eco_score, 2),
        };

        Ok(ScenarioComparison {
            baseline,
            proposed,
            delta,
        })
    }
}
