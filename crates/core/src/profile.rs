//! Reference profiles consumed by the engine.
//!
//! These are plain immutable values. Whatever backs the catalog (a database,
//! a static table, a test fixture) converts its records into these types
//! before handing them to the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Model category
// ---------------------------------------------------------------------------

/// Fixed taxonomy of model categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelCategory {
    FrontierLlm,
    MidSizeLlm,
    SmallEdge,
    CodeModel,
    ImageGen,
    Embedding,
    Multimodal,
    Custom,
}

impl ModelCategory {
    /// Every category, in declaration order.
    pub const ALL: [ModelCategory; 8] = [
        Self::FrontierLlm,
        Self::MidSizeLlm,
        Self::SmallEdge,
        Self::CodeModel,
        Self::ImageGen,
        Self::Embedding,
        Self::Multimodal,
        Self::Custom,
    ];

    /// Wire/storage name (`"frontier-llm"`, `"small-edge"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontierLlm => "frontier-llm",
            Self::MidSizeLlm => "mid-size-llm",
            Self::SmallEdge => "small-edge",
            Self::CodeModel => "code-model",
            Self::ImageGen => "image-gen",
            Self::Embedding => "embedding",
            Self::Multimodal => "multimodal",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("Unknown model category: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Family name that marks a user-supplied model with unverified figures.
pub const CUSTOM_FAMILY: &str = "custom";

/// An AI model's inference characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub id: String,
    pub slug: String,
    pub display_name: String,
    pub family: String,
    pub category: ModelCategory,
    pub parameters_billion: f64,
    /// kWh consumed per million tokens at the accelerator (before PUE).
    pub energy_per_million_tokens_kwh: f64,
    /// Id of the [`GpuProfile`] used when no override is given.
    pub default_gpu: String,
    pub gpu_count_inference: u32,
    pub tokens_per_second_per_gpu: u32,
    /// Capability score, 0-100.
    pub quality_score: u8,
    pub training_energy_mwh: Option<f64>,
    pub training_co2e_tons: Option<f64>,
    pub description: Option<String>,
    pub is_predefined: bool,
    /// Soft-delete marker. Inactive models stay in the catalog for audit
    /// purposes but are never returned by lookups.
    pub is_active: bool,
}

impl ModelProfile {
    /// Whether the profile is user-supplied rather than benchmarked.
    pub fn is_custom_family(&self) -> bool {
        self.family == CUSTOM_FAMILY
    }
}

/// Static hardware reference for an inference accelerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuProfile {
    pub id: String,
    pub name: String,
    pub tdp_watts: u32,
    /// Typical utilization fraction, 0.0-1.0.
    pub typical_utilization: f64,
    pub memory_gb: u32,
    pub flops_teraflops: u32,
    /// Manufacturing (embodied) carbon in kg CO2e.
    pub embodied_carbon_kg_co2e: f64,
    /// Expected operational lifespan. Must be non-zero.
    pub expected_lifespan_hours: u32,
    pub water_cooling_liters_per_hour: f64,
}

/// Regional grid carbon intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridProfile {
    pub region_id: String,
    pub provider: String,
    pub location: String,
    pub gco2e_per_kwh: f64,
    /// Citation for the intensity figure.
    pub source: String,
    pub year: i32,
    /// Share of renewable generation, 0-100.
    pub renewable_percentage: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in ModelCategory::ALL {
            assert_eq!(category.as_str().parse::<ModelCategory>(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_invalid_input() {
        let err = "quantum-llm".parse::<ModelCategory>().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("Unknown model category: quantum-llm".into())
        );
    }

    #[test]
    fn category_serializes_kebab_case() {
        let json = serde_json::to_string(&ModelCategory::MidSizeLlm).unwrap();
        assert_eq!(json, "\"mid-size-llm\"");
    }
}
