//! The engine entry point.
//!
//! [`Calculator`] binds a [`ReferenceCatalog`] to an [`EngineConfig`] and
//! exposes every engine operation. Operations are spread across the
//! `footprint`, `ecoscore`, `comparison`, `calculation` and `scenario`
//! modules as separate `impl` blocks; this module holds reference
//! resolution and the profile sanity checks they share.
//!
//! A calculator holds no mutable state. Many can run in parallel over the
//! same catalog.

use crate::catalog::ReferenceCatalog;
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::profile::{GpuProfile, GridProfile, ModelProfile};

/// Stateless calculation engine over a catalog.
pub struct Calculator<'a, C: ReferenceCatalog + ?Sized> {
    catalog: &'a C,
    config: EngineConfig,
}

impl<'a, C: ReferenceCatalog + ?Sized> Calculator<'a, C> {
    /// Create a calculator that owns `config`.
    pub fn new(catalog: &'a C, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Create a calculator with [`EngineConfig::default`].
    pub fn with_defaults(catalog: &'a C) -> Self {
        Self::new(catalog, EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Resolve an active model by id or slug.
    pub fn resolve_model(&self, id_or_slug: &str) -> Result<ModelProfile, CoreError> {
        self.catalog
            .lookup_model(id_or_slug)
            .ok_or_else(|| CoreError::not_found("Model", id_or_slug))
    }

    /// Resolve a GPU profile by id.
    pub fn resolve_gpu(&self, id: &str) -> Result<GpuProfile, CoreError> {
        self.catalog
            .lookup_gpu(id)
            .ok_or_else(|| CoreError::not_found("GPU", id))
    }

    /// Resolve a grid profile by region id.
    pub fn resolve_grid(&self, region_id: &str) -> Result<GridProfile, CoreError> {
        self.catalog
            .lookup_grid(region_id)
            .ok_or_else(|| CoreError::not_found("Region", region_id))
    }

    /// Resolve the model, its effective GPU (override or default) and the
    /// region, in that order, checking each profile is usable.
    pub(crate) fn resolve_scenario(
        &self,
        model_id: &str,
        region_id: &str,
        gpu_override: Option<&str>,
    ) -> Result<(ModelProfile, GpuProfile, GridProfile), CoreError> {
        let (model, gpu) = self.resolve_hardware(model_id, gpu_override)?;
        let grid = self.resolve_checked_grid(region_id)?;
        Ok((model, gpu, grid))
    }

    /// Resolve a model and the GPU it runs on.
    pub(crate) fn resolve_hardware(
        &self,
        model_id: &str,
        gpu_override: Option<&str>,
    ) -> Result<(ModelProfile, GpuProfile), CoreError> {
        let model = self.resolve_model(model_id)?;
        check_model(&model)?;
        let gpu = self.resolve_gpu(gpu_override.unwrap_or(&model.default_gpu))?;
        check_gpu(&gpu)?;
        Ok((model, gpu))
    }

    pub(crate) fn resolve_checked_grid(&self, region_id: &str) -> Result<GridProfile, CoreError> {
        let grid = self.resolve_grid(region_id)?;
        check_grid(&grid)?;
        Ok(grid)
    }
}

// ---------------------------------------------------------------------------
// Profile checks
// ---------------------------------------------------------------------------

/// Fields used as divisors or log arguments must be in range, otherwise the
/// engine would emit NaN or negative figures.
pub(crate) fn check_model(model: &ModelProfile) -> Result<(), CoreError> {
    if model.tokens_per_second_per_gpu == 0 || model.gpu_count_inference == 0 {
        return Err(CoreError::InvalidInput(format!(
            "Model {} must have at least 1 GPU and 1 token/s throughput",
            model.slug
        )));
    }
    if !(model.energy_per_million_tokens_kwh.is_finite()
        && model.energy_per_million_tokens_kwh > 0.0)
    {
        return Err(CoreError::InvalidInput(format!(
            "Model {} energy coefficient must be positive, got {}",
            model.slug, model.energy_per_million_tokens_kwh
        )));
    }
    Ok(())
}

pub(crate) fn check_gpu(gpu: &GpuProfile) -> Result<(), CoreError> {
    if gpu.expected_lifespan_hours == 0 {
        return Err(CoreError::InvalidInput(format!(
            "GPU {} expected lifespan must be positive",
            gpu.id
        )));
    }
    if !(gpu.embodied_carbon_kg_co2e >= 0.0 && gpu.water_cooling_liters_per_hour >= 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "GPU {} carbon and cooling figures must be non-negative",
            gpu.id
        )));
    }
    Ok(())
}

pub(crate) fn check_grid(grid: &GridProfile) -> Result<(), CoreError> {
    if !(grid.gco2e_per_kwh.is_finite() && grid.gco2e_per_kwh >= 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "Region {} carbon intensity must be non-negative",
            grid.region_id
        )));
    }
    if grid.renewable_percentage > 100 {
        return Err(CoreError::InvalidInput(format!(
            "Region {} renewable share must be 0-100, got {}",
            grid.region_id, grid.renewable_percentage
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::reference;

    #[test]
    fn unknown_model_carries_requested_id() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        assert_matches!(
            calc.resolve_model("gpt-9"),
            Err(CoreError::NotFound { entity: "Model", id }) if id == "gpt-9"
        );
    }

    #[test]
    fn unknown_gpu_and_region() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        assert_matches!(
            calc.resolve_gpu("tpu-v5"),
            Err(CoreError::NotFound { entity: "GPU", id }) if id == "tpu-v5"
        );
        assert_matches!(
            calc.resolve_grid("moon-1"),
            Err(CoreError::NotFound { entity: "Region", id }) if id == "moon-1"
        );
    }

    #[test]
    fn scenario_uses_gpu_override() {
        let catalog = reference::predefined_catalog();
        let calc = Calculator::with_defaults(&catalog);
        let (model, gpu, grid) = calc
            .resolve_scenario("gpt35", "us-west-2", Some("nvidia-h100"))
            .unwrap();
        assert_eq!(model.slug, "gpt35");
        assert_eq!(gpu.id, "nvidia-h100");
        assert_eq!(grid.region_id, "us-west-2");
    }

    #[test]
    fn model_with_missing_default_gpu_is_not_found() {
        let mut catalog = InMemoryCatalog::new();
        let mut model = reference::predefined_models().remove(0);
        model.default_gpu = "ghost-gpu".into();
        catalog.insert_model(model);
        let calc = Calculator::with_defaults(&catalog);

        assert_matches!(
            calc.resolve_scenario("gpt4", "us-west-2", None),
            Err(CoreError::NotFound { entity: "GPU", .. })
        );
    }

    #[test]
    fn zero_throughput_model_rejected() {
        let mut model = reference::predefined_models().remove(0);
        model.tokens_per_second_per_gpu = 0;
        assert_matches!(check_model(&model), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn zero_lifespan_gpu_rejected() {
        let mut gpu = reference::predefined_gpus().remove(0);
        gpu.expected_lifespan_hours = 0;
        assert_matches!(check_gpu(&gpu), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn negative_intensity_rejected() {
        let mut grid = reference::predefined_grids().remove(0);
        grid.gco2e_per_kwh = -1.0;
        assert_matches!(check_grid(&grid), Err(CoreError::InvalidInput(_)));
    }
}
