//! A complete calculation: footprint and EcoScore for one workload.
//!
//! This is the pairing persisted as an audit record by the storage layer.

use serde::Serialize;

use crate::calculator::Calculator;
use crate::catalog::ReferenceCatalog;
use crate::config::EcoScoreWeights;
use crate::ecoscore::EcoScoreResult;
use crate::error::CoreError;
use crate::footprint::{total_tokens, FootprintResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub model_id: String,
    pub region_id: String,
    pub request_count: u64,
    pub avg_tokens_per_request: u64,
    pub gpu_override: Option<String>,
    pub pue: Option<f64>,
    pub wue: Option<f64>,
    pub weights: Option<EcoScoreWeights>,
}

impl CalculationRequest {
    pub fn new(
        model_id: impl Into<String>,
        region_id: impl Into<String>,
        request_count: u64,
        avg_tokens_per_request: u64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            region_id: region_id.into(),
            request_count,
            avg_tokens_per_request,
            gpu_override: None,
            pue: None,
            wue: None,
            weights: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub total_tokens: u64,
    pub footprint: FootprintResult,
    pub eco_score: EcoScoreResult,
    /// Footprint assumptions followed by EcoScore assumptions.
    pub assumptions: Vec<String>,
}

impl<'a, C: ReferenceCatalog + ?Sized> Calculator<'a, C> {
    /// Footprint plus EcoScore for `request_count x avg_tokens_per_request`
    /// tokens. Both counts must be at least 1.
    pub fn calculate(&self, request: &CalculationRequest) -> Result<Calculation, CoreError> {
        if request.request_count == 0 || request.avg_tokens_per_request == 0 {
            return Err(CoreError::InvalidInput(
                "request_count and avg_tokens_per_request must be at least 1".into(),
            ));
        }
        let tokens = total_tokens(request.request_count, request.avg_tokens_per_request)?;
        let weights = self.effective_weights(request.weights.as_ref())?;
        let pue = self.pue_factor(request.pue)?;
        let wue = self.wue_factor(request.wue)?;

        let (model, gpu, grid) = self.resolve_scenario(
            &request.model_id,
            &request.region_id,
            request.gpu_override.as_deref(),
        )?;

        let eco_score = self.score_profiles(&model, &gpu, &grid, &weights);
        let footprint = self.footprint_for(model, gpu, grid, tokens, request.request_count, pue, wue);

        let assumptions = footprint
            .assumptions
            .iter()
            .chain(&eco_score.assumptions)
            .cloned()
            .collect();

        Ok(Calculation {
            total_tokens: tokens,
            footprint,
            eco_score,
            assumptions,
        })
    }
}
