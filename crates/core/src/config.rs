//! Engine constants, grouped into a single [`EngineConfig`].
//!
//! The defaults encode industry reference points. They are engine
//! constants, not catalog data; tests substitute alternate tables by
//! constructing a custom config.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Power usage effectiveness applied when the caller gives no override.
pub const DEFAULT_PUE: f64 = 1.2;
/// Facility water usage effectiveness (L/kWh) when not overridden.
pub const DEFAULT_WUE_LITERS_PER_KWH: f64 = 1.1;
/// Average EU passenger car: 168 g CO2/km.
pub const KM_DRIVING_PER_KG_CO2E: f64 = 5.95;
/// Roughly 0.012 kWh per full charge.
pub const SMARTPHONE_CHARGES_PER_KWH: f64 = 86.0;

/// Tokens in one million (the normalization scale).
pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;
/// Seconds per hour (3600.0).
pub const SECS_PER_HOUR: f64 = 3600.0;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A `(best, worst)` pair. `best` maps to a score of 100, `worst` to 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRange {
    pub best: f64,
    pub worst: f64,
}

impl BenchmarkRange {
    pub const fn new(best: f64, worst: f64) -> Self {
        Self { best, worst }
    }
}

/// Fixed best/worst reference points for the five EcoScore sub-metrics.
///
/// All per-token figures are at a scale of one million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    /// kWh per million tokens.
    pub energy_per_million_tokens: BenchmarkRange,
    /// grams CO2e per million tokens.
    pub co2e_per_million_tokens: BenchmarkRange,
    /// liters per million tokens.
    pub water_per_million_tokens: BenchmarkRange,
    /// grams of amortized embodied CO2e per million tokens.
    pub hardware_amortized_per_million_tokens: BenchmarkRange,
    /// renewable grid share, percent.
    pub renewable_percentage: BenchmarkRange,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            energy_per_million_tokens: BenchmarkRange::new(0.03, 5.0),
            co2e_per_million_tokens: BenchmarkRange::new(2.3, 2100.0),
            water_per_million_tokens: BenchmarkRange::new(0.03, 5.5),
            hardware_amortized_per_million_tokens: BenchmarkRange::new(0.5, 120.0),
            renewable_percentage: BenchmarkRange::new(100.0, 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Relative weight of each sub-score in the overall EcoScore.
///
/// The defaults sum to 1.0. Caller-supplied weights are used as given and
/// are never re-normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoScoreWeights {
    pub energy_efficiency: f64,
    pub carbon_intensity: f64,
    pub water_usage: f64,
    pub hardware_lifecycle: f64,
    pub renewable_alignment: f64,
}

impl Default for EcoScoreWeights {
    fn default() -> Self {
        Self {
            energy_efficiency: 0.30,
            carbon_intensity: 0.30,
            water_usage: 0.10,
            hardware_lifecycle: 0.10,
            renewable_alignment: 0.20,
        }
    }
}

impl EcoScoreWeights {
    /// Sum of all five weights.
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 5] {
        [
            self.energy_efficiency,
            self.carbon_intensity,
            self.water_usage,
            self.hardware_lifecycle,
            self.renewable_alignment,
        ]
    }

    /// Reject NaN, infinite, or negative weights.
    ///
    /// A negative weight would make the overall score decrease when a
    /// sub-score improves.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0) {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(
                "EcoScore weights must be finite and non-negative".into(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Equivalences
// ---------------------------------------------------------------------------

/// Conversion factors for the "everyday equivalent" metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equivalences {
    pub km_driving_per_kg_co2e: f64,
    pub smartphone_charges_per_kwh: f64,
}

impl Default for Equivalences {
    fn default() -> Self {
        Self {
            km_driving_per_kg_co2e: KM_DRIVING_PER_KG_CO2E,
            smartphone_charges_per_kwh: SMARTPHONE_CHARGES_PER_KWH,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Every constant the engine reads, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_pue: f64,
    pub default_wue_liters_per_kwh: f64,
    pub equivalences: Equivalences,
    pub benchmarks: Benchmarks,
    pub default_weights: EcoScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_pue: DEFAULT_PUE,
            default_wue_liters_per_kwh: DEFAULT_WUE_LITERS_PER_KWH,
            equivalences: Equivalences::default(),
            benchmarks: Benchmarks::default(),
            default_weights: EcoScoreWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((EcoScoreWeights::default().total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn negative_weight_rejected() {
        let weights = EcoScoreWeights {
            water_usage: -0.1,
            ..EcoScoreWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn nan_weight_rejected() {
        let weights = EcoScoreWeights {
            carbon_intensity: f64::NAN,
            ..EcoScoreWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn unnormalized_weights_accepted() {
        let weights = EcoScoreWeights {
            energy_efficiency: 1.0,
            carbon_intensity: 1.0,
            water_usage: 1.0,
            hardware_lifecycle: 1.0,
            renewable_alignment: 1.0,
        };
        assert!(weights.validate().is_ok());
        assert!((weights.total() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn weights_use_camel_case_keys() {
        let json = serde_json::to_value(EcoScoreWeights::default()).unwrap();
        assert_eq!(json["energyEfficiency"], 0.30);
        assert_eq!(json["renewableAlignment"], 0.20);
    }
}
