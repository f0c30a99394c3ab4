//! AI model profile entity and custom-model DTOs.

use ecoscore_core::error::CoreError;
use ecoscore_core::profile::{ModelCategory, ModelProfile};
use ecoscore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::narrow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `ai_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiModel {
    pub id: DbId,
    pub slug: String,
    pub display_name: String,
    pub family: String,
    pub category: String,
    pub parameters_billion: f64,
    pub energy_per_million_tokens_kwh: f64,
    pub default_gpu: String,
    pub gpu_count_inference: i32,
    pub tokens_per_second_per_gpu: i32,
    pub quality_score: i16,
    pub training_energy_mwh: Option<f64>,
    pub training_co2e_tons: Option<f64>,
    pub description: Option<String>,
    pub is_predefined: bool,
    pub is_active: bool,
    pub organization_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AiModel {
    /// Convert into the engine's profile. The database id, rendered as
    /// text, becomes the profile id.
    pub fn to_profile(&self) -> Result<ModelProfile, CoreError> {
        Ok(ModelProfile {
            id: self.id.to_string(),
            slug: self.slug.clone(),
            display_name: self.display_name.clone(),
            family: self.family.clone(),
            category: self.category.parse()?,
            parameters_billion: self.parameters_billion,
            energy_per_million_tokens_kwh: self.energy_per_million_tokens_kwh,
            default_gpu: self.default_gpu.clone(),
            gpu_count_inference: narrow(self.gpu_count_inference, "gpu_count_inference")?,
            tokens_per_second_per_gpu: narrow(
                self.tokens_per_second_per_gpu,
                "tokens_per_second_per_gpu",
            )?,
            quality_score: narrow(self.quality_score, "quality_score")?,
            training_energy_mwh: self.training_energy_mwh,
            training_co2e_tons: self.training_co2e_tons,
            description: self.description.clone(),
            is_predefined: self.is_predefined,
            is_active: self.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

fn default_gpu_count() -> i32 {
    1
}

/// DTO for registering a custom model. The slug is generated server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomModel {
    #[validate(length(min = 2, max = 200))]
    pub display_name: String,
    #[validate(length(min = 1, max = 100))]
    pub family: String,
    pub category: ModelCategory,
    #[validate(range(exclusive_min = 0.0, max = 10000.0))]
    pub parameters_billion: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub energy_per_million_tokens_kwh: f64,
    pub default_gpu: String,
    #[serde(default = "default_gpu_count")]
    #[validate(range(min = 1, max = 64))]
    pub gpu_count_inference: i32,
    #[validate(range(min = 1, max = 10000))]
    pub tokens_per_second_per_gpu: i32,
    #[validate(range(min = 0, max = 100))]
    pub quality_score: i16,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl CreateCustomModel {
    /// Trim surrounding whitespace from the display name. Apply before
    /// validating so length limits see the stored value.
    pub fn normalized(mut self) -> Self {
        self.display_name = self.display_name.trim().to_string();
        self
    }
}

/// DTO for patching a custom model. Only present fields are applied; the
/// same limits as [`CreateCustomModel`] hold for each of them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomModel {
    #[validate(length(min = 2, max = 200))]
    pub display_name: Option<String>,
    pub category: Option<ModelCategory>,
    #[validate(range(exclusive_min = 0.0, max = 10000.0))]
    pub parameters_billion: Option<f64>,
    #[validate(range(exclusive_min = 0.0, max = 100.0))]
    pub energy_per_million_tokens_kwh: Option<f64>,
    pub default_gpu: Option<String>,
    #[validate(range(min = 1, max = 64))]
    pub gpu_count_inference: Option<i32>,
    #[validate(range(min = 1, max = 10000))]
    pub tokens_per_second_per_gpu: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub quality_score: Option<i16>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl UpdateCustomModel {
    pub fn normalized(mut self) -> Self {
        self.display_name = self.display_name.map(|name| name.trim().to_string());
        self
    }
}

/// Listing filter for `GET /models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelListFilter {
    pub category: Option<ModelCategory>,
    #[serde(default = "default_true")]
    pub include_predefined: bool,
    #[serde(default = "default_true")]
    pub include_custom: bool,
}

impl Default for ModelListFilter {
    fn default() -> Self {
        Self {
            category: None,
            include_predefined: true,
            include_custom: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Values written when seeding a predefined model.
#[derive(Debug, Clone)]
pub struct UpsertPredefinedModel {
    pub slug: String,
    pub display_name: String,
    pub family: String,
    pub category: ModelCategory,
    pub parameters_billion: f64,
    pub energy_per_million_tokens_kwh: f64,
    pub default_gpu: String,
    pub gpu_count_inference: i32,
    pub tokens_per_second_per_gpu: i32,
    pub quality_score: i16,
    pub training_energy_mwh: Option<f64>,
    pub training_co2e_tons: Option<f64>,
    pub description: Option<String>,
}

impl TryFrom<&ModelProfile> for UpsertPredefinedModel {
    type Error = CoreError;

    fn try_from(model: &ModelProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            slug: model.slug.clone(),
            display_name: model.display_name.clone(),
            family: model.family.clone(),
            category: model.category,
            parameters_billion: model.parameters_billion,
            energy_per_million_tokens_kwh: model.energy_per_million_tokens_kwh,
            default_gpu: model.default_gpu.clone(),
            gpu_count_inference: narrow(model.gpu_count_inference, "gpu_count_inference")?,
            tokens_per_second_per_gpu: narrow(
                model.tokens_per_second_per_gpu,
                "tokens_per_second_per_gpu",
            )?,
            quality_score: i16::from(model.quality_score),
            training_energy_mwh: model.training_energy_mwh,
            training_co2e_tons: model.training_co2e_tons,
            description: model.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateCustomModel {
        CreateCustomModel {
            display_name: "  In-house Llama  ".to_string(),
            family: "custom".to_string(),
            category: ModelCategory::Custom,
            parameters_billion: 13.0,
            energy_per_million_tokens_kwh: 0.08,
            default_gpu: "nvidia-a10g".to_string(),
            gpu_count_inference: 1,
            tokens_per_second_per_gpu: 150,
            quality_score: 62,
            description: None,
        }
    }

    #[test]
    fn valid_input_passes_after_trim() {
        let input = create().normalized();
        assert_eq!(input.display_name, "In-house Llama");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn whitespace_padded_short_name_fails_after_trim() {
        let mut input = create();
        input.display_name = "  x ".to_string();
        let errors = input.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("display_name"));
    }

    #[test]
    fn zero_parameters_and_excess_gpus_fail() {
        let mut input = create();
        input.parameters_billion = 0.0;
        input.gpu_count_inference = 65;
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("parameters_billion"));
        assert!(fields.contains_key("gpu_count_inference"));
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(UpdateCustomModel::default().validate().is_ok());

        let update = UpdateCustomModel {
            quality_score: Some(101),
            ..Default::default()
        };
        assert!(update.validate().unwrap_err().field_errors().contains_key("quality_score"));
    }

    #[test]
    fn gpu_count_defaults_to_one() {
        let json = r#"{
            "display_name": "Edge",
            "family": "custom",
            "category": "small-edge",
            "parameters_billion": 1.5,
            "energy_per_million_tokens_kwh": 0.02,
            "default_gpu": "nvidia-t4",
            "tokens_per_second_per_gpu": 300,
            "quality_score": 40
        }"#;
        let input: CreateCustomModel = serde_json::from_str(json).unwrap();
        assert_eq!(input.gpu_count_inference, 1);
        assert_eq!(input.category, ModelCategory::SmallEdge);
    }
}
