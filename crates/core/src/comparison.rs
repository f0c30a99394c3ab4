//! Comparison/Recommendation Engine.
//!
//! Runs the footprint and EcoScore for several models under one scenario,
//! ranks them three ways and writes a short recommendation.

use std::cmp::Ordering;

use serde::Serialize;

use crate::calculator::Calculator;
use crate::catalog::ReferenceCatalog;
use crate::config::EcoScoreWeights;
use crate::ecoscore::EcoScoreResult;
use crate::error::CoreError;
use crate::footprint::total_tokens;
use crate::format::{group_thousands, round_to};

/// Requests in the default comparison batch.
pub const DEFAULT_REQUESTS_PER_BATCH: u64 = 1000;
/// Average tokens per request in the default comparison batch.
pub const DEFAULT_AVG_TOKENS_PER_REQUEST: u64 = 1000;

/// Emissions improvement (percent) above which a switch is suggested.
const SWITCH_THRESHOLD_PCT: f64 = 10.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    /// Model ids or slugs. Duplicates are evaluated independently.
    pub model_ids: Vec<String>,
    pub region_id: String,
    pub requests_per_batch: u64,
    pub avg_tokens_per_request: u64,
    pub weights: Option<EcoScoreWeights>,
}

impl ComparisonRequest {
    /// A request using the default batch of 1,000 requests x 1,000 tokens.
    pub fn new(model_ids: Vec<String>, region_id: impl Into<String>) -> Self {
        Self {
            model_ids,
            region_id: region_id.into(),
            requests_per_batch: DEFAULT_REQUESTS_PER_BATCH,
            avg_tokens_per_request: DEFAULT_AVG_TOKENS_PER_REQUEST,
            weights: None,
        }
    }
}

/// Batch-level footprint of one compared model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFootprint {
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub equivalent_km_driving: f64,
    pub equivalent_smartphone_charges: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    /// Id as requested.
    pub model_id: String,
    pub display_name: String,
    pub eco_score: EcoScoreResult,
    pub footprint: BatchFootprint,
    pub quality_score: u8,
    /// Quality points per kg CO2e, one decimal. Zero when CO2e is zero.
    pub cost_efficiency: f64,
}

/// Entry model ids in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    /// EcoScore, highest first.
    pub by_eco_score: Vec<String>,
    /// Absolute CO2e, lowest first.
    pub by_co2e: Vec<String>,
    /// Cost efficiency, highest first.
    pub by_cost_efficiency: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub best_overall: String,
    pub best_efficiency: String,
    pub best_quality_per_carbon: String,
    pub narrative: String,
    pub tradeoffs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub models: Vec<ComparisonEntry>,
    pub rankings: Rankings,
    pub recommendation: Recommendation,
    pub scenario_assumptions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

impl<'a, C: ReferenceCatalog + ?Sized> Calculator<'a, C> {
    /// Compare models under one scenario.
    ///
    /// Aborts with the first `NotFound` if the region or any model (or its
    /// default GPU) cannot be resolved.
    ///
    /// When the rankings disagree and the lowest-emission model cuts CO2e by
    /// more than 10% against the lowest EcoScore, a switch sentence is added
    /// to the tradeoffs. It quotes the quality score of the model being
    /// switched to (the lowest-emission one), not the best quality-per-carbon
    /// entry.
    pub fn compare_models(&self, request: &ComparisonRequest) -> Result<ComparisonResult, CoreError> {
        if request.model_ids.is_empty() {
            return Err(CoreError::InvalidInput(
                "At least one model is required for a comparison".into(),
            ));
        }
        let weights = self.effective_weights(request.weights.as_ref())?;
        let tokens = total_tokens(request.requests_per_batch, request.avg_tokens_per_request)?;
        let pue = self.pue_factor(None)?;
        let wue = self.wue_factor(None)?;
        let grid = self.resolve_checked_grid(&request.region_id)?;

        let mut entries = Vec::with_capacity(request.model_ids.len());
        for model_id in &request.model_ids {
            let (model, gpu) = self.resolve_hardware(model_id, None)?;
            let eco_score = self.score_profiles(&model, &gpu, &grid, &weights);
            let footprint = self.footprint_for(
                model,
                gpu,
                grid.clone(),
                tokens,
                request.requests_per_batch,
                pue,
                wue,
            );

            let cost_efficiency = if footprint.co2e_grams > 0.0 {
                round_to(
                    f64::from(footprint.model.quality_score) / (footprint.co2e_grams / 1000.0),
                    1,
                )
            } else {
                0.0
            };

            entries.push(ComparisonEntry {
                model_id: model_id.clone(),
                display_name: footprint.model.display_name.clone(),
                eco_score,
                quality_score: footprint.model.quality_score,
                cost_efficiency,
                footprint: BatchFootprint {
                    energy_kwh: footprint.energy_kwh,
                    co2e_grams: footprint.co2e_grams,
                    water_liters: footprint.water_liters,
                    hardware_amortized_grams: footprint.hardware_amortized_grams,
                    equivalent_km_driving: footprint.equivalent_km_driving,
                    equivalent_smartphone_charges: footprint.equivalent_smartphone_charges,
                },
            });
        }

        let by_score = rank(&entries, |a, b| b.eco_score.overall.total_cmp(&a.eco_score.overall));
        let by_co2e = rank(&entries, |a, b| a.footprint.co2e_grams.total_cmp(&b.footprint.co2e_grams));
        let by_cost = rank(&entries, |a, b| b.cost_efficiency.total_cmp(&a.cost_efficiency));

        let best_overall = &entries[by_score[0]];
        let best_efficiency = &entries[by_co2e[0]];
        let best_quality = &entries[by_cost[0]];
        let worst_overall = &entries[by_score[by_score.len() - 1]];

        let mut tradeoffs = Vec::new();
        if best_overall.model_id != best_efficiency.model_id {
            tradeoffs.push(format!(
                "{} has the best overall EcoScore but {} has lower absolute emissions; consider workload criticality.",
                best_overall.display_name, best_efficiency.display_name
            ));
        }
        if best_overall.model_id != best_quality.model_id {
            tradeoffs.push(format!(
                "{} delivers the most quality per unit of carbon, optimal for tasks where model capability matters.",
                best_quality.display_name
            ));
        }

        // Only suggest a switch when the rankings disagree.
        let improvement = improvement_pct(
            best_efficiency.footprint.co2e_grams,
            worst_overall.footprint.co2e_grams,
        );
        if !tradeoffs.is_empty() && improvement > SWITCH_THRESHOLD_PCT {
            tradeoffs.push(format!(
                "Switching from {} to {} could reduce emissions by ~{}% with a quality score change of {} → {}.",
                worst_overall.display_name,
                best_efficiency.display_name,
                improvement,
                worst_overall.quality_score,
                best_efficiency.quality_score
            ));
        }

        let narrative = format!(
            "Based on {} requests in {}, {} achieves the best overall EcoScore ({}, {:.1}/100). \
             For maximum efficiency, {} uses only {:.1}g CO₂e. \
             The best quality-per-carbon ratio belongs to {} at {:.1} quality points per kgCO₂e.",
            group_thousands(request.requests_per_batch),
            grid.location,
            best_overall.display_name,
            best_overall.eco_score.grade,
            best_overall.eco_score.overall,
            best_efficiency.display_name,
            best_efficiency.footprint.co2e_grams,
            best_quality.display_name,
            best_quality.cost_efficiency,
        );

        let recommendation = Recommendation {
            best_overall: best_overall.model_id.clone(),
            best_efficiency: best_efficiency.model_id.clone(),
            best_quality_per_carbon: best_quality.model_id.clone(),
            narrative,
            tradeoffs,
        };

        let ids = |order: &[usize]| -> Vec<String> {
            order.iter().map(|&i| entries[i].model_id.clone()).collect()
        };
        let rankings = Rankings {
            by_eco_score: ids(&by_score),
            by_co2e: ids(&by_co2e),
            by_cost_efficiency: ids(&by_cost),
        };

        let scenario_assumptions = vec![
            format!(
                "Comparison scenario: {} requests, {} avg tokens/request",
                group_thousands(request.requests_per_batch),
                request.avg_tokens_per_request
            ),
            format!("Region: {}", request.region_id),
            format!("Total tokens evaluated: {}", group_thousands(tokens)),
        ];

        Ok(ComparisonResult {
            models: entries,
            rankings,
            recommendation,
            scenario_assumptions,
        })
    }
}

/// Entry indices stably sorted by `cmp`; ties keep request order.
fn rank<F>(entries: &[ComparisonEntry], mut cmp: F) -> Vec<usize>
where
    F: FnMut(&ComparisonEntry, &ComparisonEntry) -> Ordering,
{
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| cmp(&entries[a], &entries[b]));
    order
}

/// Whole-percent CO2e reduction from `worst` to `best`; 0 when `worst` is 0.
fn improvement_pct(best_co2e: f64, worst_co2e: f64) -> f64 {
    if worst_co2e > 0.0 {
        ((1.0 - best_co2e / worst_co2e) * 100.0).round()
    } else {
        0.0
    }
}
