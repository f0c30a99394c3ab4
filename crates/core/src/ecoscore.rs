//! EcoScore Engine: a 0-100 sustainability rating for a model in a region.
//!
//! Five sub-metrics are derived at a normalized scale of one million tokens,
//! independent of any workload volume:
//!
//! | sub-score | raw value | normalization |
//! |---|---|---|
//! | energy efficiency | kWh per M tokens incl. default PUE | log |
//! | carbon intensity | g CO2e per M tokens on the region's grid | log |
//! | water usage | facility + server-cooling liters per M tokens | log |
//! | hardware lifecycle | amortized embodied g CO2e per M tokens | log |
//! | renewable alignment | grid renewable share (%) | linear |
//!
//! Each raw value is scored against the fixed [`Benchmarks`] and the overall
//! score is the weighted sum of the five sub-scores. Like the footprint, the
//! per-million-token duration assumes all inference GPUs run fully in
//! parallel.

use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;
use crate::catalog::ReferenceCatalog;
use crate::config::{Benchmarks, EcoScoreWeights, SECS_PER_HOUR, TOKENS_PER_MILLION};
use crate::error::CoreError;
use crate::format::round_to;
use crate::normalize::{linear_normalize, log_normalize, Grade};
use crate::profile::{GpuProfile, GridProfile, ModelProfile};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// How much the score can be trusted.
///
/// `High` is reserved for models backed by measured telemetry; no profile in
/// the catalog carries such data yet, so it is never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Custom models are self-reported and score `Low`; benchmarked
    /// predefined families score `Medium`.
    pub fn for_model(model: &ModelProfile) -> Self {
        if model.is_custom_family() {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

/// One scored sub-metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    /// Normalized score, one decimal.
    pub score: f64,
    /// Physical value that was scored.
    pub raw: f64,
    pub unit: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoScoreBreakdown {
    pub energy_efficiency: SubScore,
    pub carbon_intensity: SubScore,
    pub water_usage: SubScore,
    pub hardware_lifecycle: SubScore,
    pub renewable_alignment: SubScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoScoreResult {
    /// Weighted score, one decimal.
    pub overall: f64,
    /// Grade of `overall` as displayed (after rounding).
    pub grade: Grade,
    pub breakdown: EcoScoreBreakdown,
    pub assumptions: Vec<String>,
    pub confidence: Confidence,
}

// ---------------------------------------------------------------------------
// Raw metrics and scoring
// ---------------------------------------------------------------------------

/// Raw sub-metric values at one million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMetrics {
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_grams: f64,
    pub renewable_percentage: f64,
}

impl RawMetrics {
    /// Derive the five raw values for `model` on `gpu` in `grid`.
    ///
    /// The model must have non-zero throughput and GPU count and the GPU a
    /// non-zero lifespan.
    pub fn per_million_tokens(
        model: &ModelProfile,
        gpu: &GpuProfile,
        grid: &GridProfile,
        pue: f64,
        wue: f64,
    ) -> Self {
        let gpu_count = f64::from(model.gpu_count_inference);
        let inference_hours = TOKENS_PER_MILLION
            / (f64::from(model.tokens_per_second_per_gpu) * gpu_count)
            / SECS_PER_HOUR;

        let energy_kwh = model.energy_per_million_tokens_kwh * pue;
        let co2e_grams = energy_kwh * grid.gco2e_per_kwh;
        let water_liters = energy_kwh * wue + gpu.water_cooling_liters_per_hour * inference_hours;
        let hardware_grams = gpu.embodied_carbon_kg_co2e * 1000.0
            / f64::from(gpu.expected_lifespan_hours)
            * gpu_count
            * inference_hours;

        Self {
            energy_kwh,
            co2e_grams,
            water_liters,
            hardware_grams,
            renewable_percentage: f64::from(grid.renewable_percentage),
        }
    }
}

/// Unrounded sub-scores, in breakdown order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub energy_efficiency: f64,
    pub carbon_intensity: f64,
    pub water_usage: f64,
    pub hardware_lifecycle: f64,
    pub renewable_alignment: f64,
}

impl SubScores {
    /// Normalize each raw metric against its benchmark.
    pub fn from_raw(raw: &RawMetrics, benchmarks: &Benchmarks) -> Self {
        let b = benchmarks;
        Self {
            energy_efficiency: log_normalize(
                raw.energy_kwh,
                b.energy_per_million_tokens.best,
                b.energy_per_million_tokens.worst,
            ),
            carbon_intensity: log_normalize(
                raw.co2e_grams,
                b.co2e_per_million_tokens.best,
                b.co2e_per_million_tokens.worst,
            ),
            water_usage: log_normalize(
                raw.water_liters,
                b.water_per_million_tokens.best,
                b.water_per_million_tokens.worst,
            ),
            hardware_lifecycle: log_normalize(
                raw.hardware_grams,
                b.hardware_amortized_per_million_tokens.best,
                b.hardware_amortized_per_million_tokens.worst,
            ),
            renewable_alignment: linear_normalize(
                raw.renewable_percentage,
                b.renewable_percentage.worst,
                b.renewable_percentage.best,
            ),
        }
    }

    /// `Σ weight * score`. Weights are used as given.
    pub fn weighted(&self, weights: &EcoScoreWeights) -> f64 {
        weights.energy_efficiency * self.energy_efficiency
            + weights.carbon_intensity * self.carbon_intensity
            + weights.water_usage * self.water_usage
            + weights.hardware_lifecycle * self.hardware_lifecycle
            + weights.renewable_alignment * self.renewable_alignment
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

impl<'a, C: ReferenceCatalog + ?Sized> Calculator<'a, C> {
    /// Score `model_id` in `region_id`.
    ///
    /// `weights` defaults to the configured weights. `gpu_override` replaces
    /// the model's default GPU exactly as in the footprint.
    pub fn eco_score(
        &self,
        model_id: &str,
        region_id: &str,
        weights: Option<&EcoScoreWeights>,
        gpu_override: Option<&str>,
    ) -> Result<EcoScoreResult, CoreError> {
        let weights = self.effective_weights(weights)?;
        let (model, gpu, grid) = self.resolve_scenario(model_id, region_id, gpu_override)?;
        Ok(self.score_profiles(&model, &gpu, &grid, &weights))
    }

    pub(crate) fn effective_weights(
        &self,
        weights: Option<&EcoScoreWeights>,
    ) -> Result<EcoScoreWeights, CoreError> {
        let weights = weights.copied().unwrap_or(self.config().default_weights);
        weights.validate()?;
        Ok(weights)
    }

    /// Score already resolved profiles.
    pub fn score_profiles(
        &self,
        model: &ModelProfile,
        gpu: &GpuProfile,
        grid: &GridProfile,
        weights: &EcoScoreWeights,
    ) -> EcoScoreResult {
        let config = self.config();
        let pue = config.default_pue;
        let benchmarks = &config.benchmarks;

        let raw = RawMetrics::per_million_tokens(model, gpu, grid, pue, config.default_wue_liters_per_kwh);
        let scores = SubScores::from_raw(&raw, benchmarks);

        // Graded before rounding; `overall` is rounded for display only.
        let weighted = scores.weighted(weights);
        let grade = Grade::from_score(weighted);
        let overall = round_to(weighted, 1);

        let assumptions = vec![
            format!(
                "Energy efficiency scored against best ({} kWh/M tokens) and worst ({} kWh/M tokens) benchmarks",
                benchmarks.energy_per_million_tokens.best, benchmarks.energy_per_million_tokens.worst
            ),
            format!(
                "Carbon intensity uses {} grid at {} gCO2e/kWh",
                grid.location, grid.gco2e_per_kwh
            ),
            format!("Region renewable energy: {}%", grid.renewable_percentage),
            "Sub-metrics evaluated at a normalized scale of 1,000,000 tokens".to_string(),
            "Confidence reflects data source quality; production use requires real telemetry"
                .to_string(),
        ];

        let breakdown = EcoScoreBreakdown {
            energy_efficiency: SubScore {
                score: round_to(scores.energy_efficiency, 1),
                raw: round_to(raw.energy_kwh, 3),
                unit: "kWh per M tokens".into(),
                explanation: format!(
                    "Model consumes {:.3} kWh per million tokens (incl. PUE {})",
                    raw.energy_kwh, pue
                ),
            },
            carbon_intensity: SubScore {
                score: round_to(scores.carbon_intensity, 1),
                raw: round_to(raw.co2e_grams, 2),
                unit: "gCO₂e per M tokens".into(),
                explanation: format!(
                    "{:.1}g CO₂e per million tokens in {}",
                    raw.co2e_grams, grid.location
                ),
            },
            water_usage: SubScore {
                score: round_to(scores.water_usage, 1),
                raw: round_to(raw.water_liters, 3),
                unit: "liters per M tokens".into(),
                explanation: format!(
                    "{:.3}L water per million tokens (facility + server cooling)",
                    raw.water_liters
                ),
            },
            hardware_lifecycle: SubScore {
                score: round_to(scores.hardware_lifecycle, 1),
                raw: round_to(raw.hardware_grams, 2),
                unit: "gCO₂e amortized per M tokens".into(),
                explanation: format!(
                    "{:.2}g embodied carbon amortized per million tokens across {}× {}",
                    raw.hardware_grams, model.gpu_count_inference, gpu.name
                ),
            },
            renewable_alignment: SubScore {
                score: round_to(scores.renewable_alignment, 1),
                raw: raw.renewable_percentage,
                unit: "% renewable grid".into(),
                explanation: format!(
                    "{} grid is {}% renewable ({})",
                    grid.location, grid.renewable_percentage, grid.source
                ),
            },
        };

        EcoScoreResult {
            overall,
            grade,
            breakdown,
            assumptions,
            confidence: Confidence::for_model(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::config::{BenchmarkRange, EngineConfig};
    use crate::profile::CUSTOM_FAMILY;
    use crate::reference;

    fn scores(value: f64) -> SubScores {
        SubScores {
            energy_efficiency: value,
            carbon_intensity: value,
            water_usage: value,
            hardware_lifecycle: value,
            renewable_alignment: value,
        }
    }

    #[test]
    fn raw_metrics_match_formulas() {
        let catalog = reference::predefined_catalog();
        let model = catalog.lookup_model("gpt35").unwrap();
        let gpu = catalog.lookup_gpu(&model.default_gpu).unwrap();
        let grid = catalog.lookup_grid("us-west-2").unwrap();

        let raw = RawMetrics::per_million_tokens(&model, &gpu, &grid, 1.2, 1.1);
        let hours = 1_000_000.0 / 240.0 / 3600.0;

        assert!((raw.energy_kwh - 0.54).abs() < 1e-9);
        assert!((raw.co2e_grams - 42.12).abs() < 1e-9);
        assert!(
            (raw.water_liters - (0.54 * 1.1 + gpu.water_cooling_liters_per_hour * hours)).abs()
                < 1e-9
        );
        let hw = gpu.embodied_carbon_kg_co2e * 1000.0 / f64::from(gpu.expected_lifespan_hours)
            * 2.0
            * hours;
        assert!((raw.hardware_grams - hw).abs() < 1e-9);
        assert_eq!(raw.renewable_percentage, 68.0);
    }

    #[test]
    fn weighted_sum_of_uniform_scores() {
        let weights = EcoScoreWeights::default();
        assert!((scores(70.0).weighted(&weights) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn weighted_is_monotonic_in_each_sub_score() {
        let weights = EcoScoreWeights::default();
        let base = scores(50.0);
        let bumps: [fn(&mut SubScores); 5] = [
            |s| s.energy_efficiency += 10.0,
            |s| s.carbon_intensity += 10.0,
            |s| s.water_usage += 10.0,
            |s| s.hardware_lifecycle += 10.0,
            |s| s.renewable_alignment += 10.0,
        ];
        for bump in bumps {
            let mut better = base;
            bump(&mut better);
            assert!(better.weighted(&weights) >= base.weighted(&weights));
        }
    }

    #[test]
    fn custom_family_has_low_confidence() {
        let mut model = reference::predefined_models().remove(0);
        assert_eq!(Confidence::for_model(&model), Confidence::Medium);
        model.family = CUSTOM_FAMILY.into();
        assert_eq!(Confidence::for_model(&model), Confidence::Low);
    }

    #[test]
    fn breakdown_serializes_camel_case_keys() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        let result = calc.eco_score("mistral7b", "eu-north-1", None, None).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "energyEfficiency",
            "carbonIntensity",
            "waterUsage",
            "hardwareLifecycle",
            "renewableAlignment",
        ] {
            assert!(json["breakdown"][key]["score"].is_number(), "missing {key}");
        }
        assert_eq!(json["confidence"], "medium");
    }

    #[test]
    fn overall_stays_within_bounds() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        for model in catalog.active_models() {
            let result = calc.eco_score(&model.slug, "us-east-1", None, None).unwrap();
            assert!((0.0..=100.0).contains(&result.overall));
        }
    }

    #[test]
    fn grade_uses_unrounded_score() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        let model = catalog.lookup_model("mistral7b").unwrap();
        let gpu = catalog.lookup_gpu(&model.default_gpu).unwrap();
        let grid = GridProfile {
            renewable_percentage: 100,
            ..catalog.lookup_grid("eu-north-1").unwrap()
        };
        let weights = EcoScoreWeights {
            energy_efficiency: 0.0,
            carbon_intensity: 0.0,
            water_usage: 0.0,
            hardware_lifecycle: 0.0,
            renewable_alignment: 0.8996,
        };

        let result = calc.score_profiles(&model, &gpu, &grid, &weights);

        assert_eq!(result.overall, 90.0);
        assert_eq!(result.grade, Grade::A);
    }

    #[test]
    fn invalid_weights_rejected_before_lookup() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        let weights = EcoScoreWeights {
            energy_efficiency: -1.0,
            ..EcoScoreWeights::default()
        };
        assert_matches!(
            calc.eco_score("no-such-model", "us-west-2", Some(&weights), None),
            Err(CoreError::InvalidInput(_))
        );
    }

    #[test]
    fn zero_weights_score_zero() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        let weights = EcoScoreWeights {
            energy_efficiency: 0.0,
            carbon_intensity: 0.0,
            water_usage: 0.0,
            hardware_lifecycle: 0.0,
            renewable_alignment: 0.0,
        };
        let result = calc.eco_score("gpt4", "us-west-2", Some(&weights), None).unwrap();
        assert_eq!(result.overall, 0.0);
        assert_eq!(result.grade, Grade::F);
    }

    #[test]
    fn alternate_benchmarks_are_honoured() {
        let catalog = reference::predefined_catalog();
        let mut config = EngineConfig::default();
        // Everything at or below the best point scores 100.
        config.benchmarks = Benchmarks {
            energy_per_million_tokens: BenchmarkRange::new(1000.0, 2000.0),
            co2e_per_million_tokens: BenchmarkRange::new(1e6, 2e6),
            water_per_million_tokens: BenchmarkRange::new(1000.0, 2000.0),
            hardware_amortized_per_million_tokens: BenchmarkRange::new(1e6, 2e6),
            renewable_percentage: BenchmarkRange::new(0.0, -1.0),
        };
        let calc = Calculator::new(&catalog, config);
        let result = calc.eco_score("gpt4", "us-east-1", None, None).unwrap();
        assert_eq!(result.overall, 100.0);
        assert_eq!(result.grade, Grade::APlus);
    }

    #[test]
    fn gpu_override_changes_hardware_only_metrics() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        let default = calc.eco_score("gpt35", "us-west-2", None, None).unwrap();
        let h100 = calc
            .eco_score("gpt35", "us-west-2", None, Some("nvidia-h100"))
            .unwrap();

        assert_eq!(
            default.breakdown.energy_efficiency,
            h100.breakdown.energy_efficiency
        );
        assert_eq!(default.breakdown.carbon_intensity, h100.breakdown.carbon_intensity);
        assert_ne!(
            default.breakdown.hardware_lifecycle.raw,
            h100.breakdown.hardware_lifecycle.raw
        );
        assert!(h100
            .breakdown
            .hardware_lifecycle
            .explanation
            .ends_with("2× NVIDIA H100 SXM5"));
    }
}
