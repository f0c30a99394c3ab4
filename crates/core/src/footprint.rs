//! Footprint Calculator: token volume to energy, CO2e, water and embodied
//! hardware carbon.
//!
//! The stage functions are pure and public so they can be tested (and
//! reused) in isolation. [`Calculator::compute_full_footprint`] chains them
//! after resolving the referenced profiles.
//!
//! # Duration model
//!
//! Inference duration is `tokens / (tokens_per_second_per_gpu * gpu_count)`.
//! This assumes every inference GPU is fully busy in parallel for the whole
//! workload, with no queueing or batching inefficiency. Real deployments run
//! longer, so water from server cooling and amortized hardware carbon are
//! lower bounds.

use serde::Serialize;

use crate::calculator::Calculator;
use crate::catalog::ReferenceCatalog;
use crate::config::{SECS_PER_HOUR, TOKENS_PER_MILLION};
use crate::error::CoreError;
use crate::format::group_thousands;
use crate::profile::{GpuProfile, GridProfile, ModelProfile};

// ---------------------------------------------------------------------------
// Input / result
// ---------------------------------------------------------------------------

/// A single footprint request.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintInput {
    /// Model id or slug.
    pub model_id: String,
    pub region_id: String,
    pub total_tokens: u64,
    /// Per-request metrics divide by this, floored at 1.
    pub request_count: u64,
    /// Run on this GPU instead of the model's default.
    pub gpu_override: Option<String>,
    /// Power usage effectiveness; engine default when `None`.
    pub pue: Option<f64>,
    /// Water usage effectiveness (L/kWh); engine default when `None`.
    pub wue: Option<f64>,
}

impl FootprintInput {
    pub fn new(
        model_id: impl Into<String>,
        region_id: impl Into<String>,
        total_tokens: u64,
        request_count: u64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            region_id: region_id.into(),
            total_tokens,
            request_count,
            gpu_override: None,
            pue: None,
            wue: None,
        }
    }

    /// Derive `total_tokens` as `request_count * avg_tokens_per_request`.
    pub fn from_requests(
        model_id: impl Into<String>,
        region_id: impl Into<String>,
        request_count: u64,
        avg_tokens_per_request: u64,
    ) -> Result<Self, CoreError> {
        let total_tokens = total_tokens(request_count, avg_tokens_per_request)?;
        Ok(Self::new(model_id, region_id, total_tokens, request_count))
    }

    pub fn with_gpu(mut self, gpu_id: impl Into<String>) -> Self {
        self.gpu_override = Some(gpu_id.into());
        self
    }

    pub fn with_pue(mut self, pue: f64) -> Self {
        self.pue = Some(pue);
        self
    }

    pub fn with_wue(mut self, wue: f64) -> Self {
        self.wue = Some(wue);
        self
    }
}

/// `request_count * avg_tokens_per_request`, rejecting overflow.
pub fn total_tokens(request_count: u64, avg_tokens_per_request: u64) -> Result<u64, CoreError> {
    request_count
        .checked_mul(avg_tokens_per_request)
        .ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "Token volume overflows: {request_count} requests x {avg_tokens_per_request} tokens"
            ))
        })
}

/// Absolute and derived footprint of one workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintResult {
    pub energy_kwh: f64,
    pub co2e_grams: f64,
    pub water_liters: f64,
    pub hardware_amortized_grams: f64,
    pub duration_hours: f64,
    pub energy_per_request: f64,
    pub co2e_per_request: f64,
    pub water_per_request: f64,
    pub equivalent_km_driving: f64,
    pub equivalent_smartphone_charges: f64,
    pub pue: f64,
    pub wue: f64,
    pub assumptions: Vec<String>,
    pub model: ModelProfile,
    pub gpu: GpuProfile,
    pub grid: GridProfile,
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// `(tokens / 1M) * kWh-per-M-tokens * pue`.
pub fn compute_energy(total_tokens: u64, model: &ModelProfile, pue: f64) -> f64 {
    (total_tokens as f64 / TOKENS_PER_MILLION) * model.energy_per_million_tokens_kwh * pue
}

/// Grams CO2e for `energy_kwh` on the given grid.
pub fn compute_co2e(energy_kwh: f64, grid: &GridProfile) -> f64 {
    energy_kwh * grid.gco2e_per_kwh
}

/// Facility water (`energy * wue`) plus server cooling over the duration.
pub fn compute_water(energy_kwh: f64, gpu: &GpuProfile, duration_hours: f64, wue: f64) -> f64 {
    energy_kwh * wue + gpu.water_cooling_liters_per_hour * duration_hours
}

/// Embodied carbon in grams amortized linearly over the GPU's lifespan.
pub fn compute_hardware_amortization(gpu: &GpuProfile, gpu_count: u32, duration_hours: f64) -> f64 {
    let grams_per_gpu_hour =
        gpu.embodied_carbon_kg_co2e * 1000.0 / f64::from(gpu.expected_lifespan_hours);
    grams_per_gpu_hour * f64::from(gpu_count) * duration_hours
}

/// Hours to serve `total_tokens` with all inference GPUs in parallel.
///
/// Assumes every GPU is fully busy for the whole run: no queuing, batching
/// overhead or idle time. Hardware amortization, cooling water and the
/// EcoScore hardware sub-metric all inherit this assumption.
///
/// The model must have non-zero throughput and GPU count.
pub fn estimate_duration_hours(total_tokens: u64, model: &ModelProfile) -> f64 {
    let tokens_per_second =
        f64::from(model.tokens_per_second_per_gpu) * f64::from(model.gpu_count_inference);
    total_tokens as f64 / tokens_per_second / SECS_PER_HOUR
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// An efficiency factor together with whether the caller supplied it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Factor {
    pub value: f64,
    pub overridden: bool,
}

impl<'a, C: ReferenceCatalog + ?Sized> Calculator<'a, C> {
    /// Resolve the input's profiles and compute its full footprint.
    ///
    /// Fails with `NotFound` for an unknown model, GPU or region and with
    /// `InvalidInput` for an out-of-range PUE/WUE override. Nothing is
    /// computed unless every reference resolves.
    pub fn compute_full_footprint(&self, input: &FootprintInput) -> Result<FootprintResult, CoreError> {
        let pue = self.pue_factor(input.pue)?;
        let wue = self.wue_factor(input.wue)?;
        let (model, gpu, grid) = self.resolve_scenario(
            &input.model_id,
            &input.region_id,
            input.gpu_override.as_deref(),
        )?;
        Ok(self.footprint_for(model, gpu, grid, input.total_tokens, input.request_count, pue, wue))
    }

    pub(crate) fn pue_factor(&self, pue: Option<f64>) -> Result<Factor, CoreError> {
        match pue {
            Some(value) if !(value.is_finite() && value > 0.0) => Err(CoreError::InvalidInput(
                format!("PUE must be a positive number, got {value}"),
            )),
            Some(value) => Ok(Factor { value, overridden: true }),
            None => Ok(Factor {
                value: self.config().default_pue,
                overridden: false,
            }),
        }
    }

    pub(crate) fn wue_factor(&self, wue: Option<f64>) -> Result<Factor, CoreError> {
        match wue {
            Some(value) if !(value.is_finite() && value >= 0.0) => Err(CoreError::InvalidInput(
                format!("WUE must be a non-negative number, got {value}"),
            )),
            Some(value) => Ok(Factor { value, overridden: true }),
            None => Ok(Factor {
                value: self.config().default_wue_liters_per_kwh,
                overridden: false,
            }),
        }
    }

    /// Footprint over already resolved and checked profiles.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn footprint_for(
        &self,
        model: ModelProfile,
        gpu: GpuProfile,
        grid: GridProfile,
        total_tokens: u64,
        request_count: u64,
        pue: Factor,
        wue: Factor,
    ) -> FootprintResult {
        let mut assumptions = Vec::with_capacity(5);

        let energy_kwh = compute_energy(total_tokens, &model, pue.value);
        assumptions.push(format!(
            "PUE factor: {} ({})",
            pue.value,
            if pue.overridden {
                "caller override"
            } else {
                "industry average for modern data centers"
            }
        ));

        let duration_hours = estimate_duration_hours(total_tokens, &model);
        assumptions.push(format!(
            "Estimated duration: {:.3} hours based on {} tok/s × {} GPUs",
            duration_hours, model.tokens_per_second_per_gpu, model.gpu_count_inference
        ));

        let co2e_grams = compute_co2e(energy_kwh, &grid);
        assumptions.push(format!(
            "Grid intensity: {} gCO2e/kWh ({})",
            grid.gco2e_per_kwh, grid.source
        ));

        let water_liters = compute_water(energy_kwh, &gpu, duration_hours, wue.value);
        assumptions.push(format!(
            "WUE: {} L/kWh ({})",
            wue.value,
            if wue.overridden {
                "caller override"
            } else {
                "Google 2023 average"
            }
        ));

        let hardware_amortized_grams =
            compute_hardware_amortization(&gpu, model.gpu_count_inference, duration_hours);
        assumptions.push(format!(
            "GPU embodied carbon: {} kgCO2e over {} hour lifespan",
            gpu.embodied_carbon_kg_co2e,
            group_thousands(u64::from(gpu.expected_lifespan_hours))
        ));

        let equivalences = self.config().equivalences;
        let requests = request_count.max(1) as f64;

        FootprintResult {
            energy_kwh,
            co2e_grams,
            water_liters,
            hardware_amortized_grams,
            duration_hours,
            energy_per_request: energy_kwh / requests,
            co2e_per_request: co2e_grams / requests,
            water_per_request: water_liters / requests,
            equivalent_km_driving: co2e_grams / 1000.0 * equivalences.km_driving_per_kg_co2e,
            equivalent_smartphone_charges: energy_kwh * equivalences.smartphone_charges_per_kwh,
            pue: pue.value,
            wue: wue.value,
            assumptions,
            model,
            gpu,
            grid,
        }
    }
}
