//! Reference catalog seam.
//!
//! The engine only needs lookup-by-id semantics and a "not found" signal.
//! [`InMemoryCatalog`] is the snapshot implementation used by the API layer
//! (loaded from the database per request) and by tests.

use std::collections::BTreeMap;

use crate::profile::{GpuProfile, GridProfile, ModelProfile};

/// Lookup capabilities the engine consumes.
///
/// Implementations must hide inactive models. Returned profiles are owned
/// copies; the engine never mutates catalog contents.
pub trait ReferenceCatalog {
    /// Resolve a model by opaque id or by slug.
    fn lookup_model(&self, id_or_slug: &str) -> Option<ModelProfile>;

    /// Resolve a GPU profile by id.
    fn lookup_gpu(&self, id: &str) -> Option<GpuProfile>;

    /// Resolve a grid profile by region id.
    fn lookup_grid(&self, region_id: &str) -> Option<GridProfile>;
}

/// A fully materialized catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    models: Vec<ModelProfile>,
    gpus: BTreeMap<String, GpuProfile>,
    grids: BTreeMap<String, GridProfile>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a model (matched on `id`). Insertion order is kept
    /// for listing.
    pub fn insert_model(&mut self, model: ModelProfile) {
        match self.models.iter_mut().find(|m| m.id == model.id) {
            Some(existing) => *existing = model,
            None => self.models.push(model),
        }
    }

    /// Insert or replace a GPU profile.
    pub fn insert_gpu(&mut self, gpu: GpuProfile) {
        self.gpus.insert(gpu.id.clone(), gpu);
    }

    /// Insert or replace a grid profile.
    pub fn insert_grid(&mut self, grid: GridProfile) {
        self.grids.insert(grid.region_id.clone(), grid);
    }

    /// Flip a model's active flag. Returns `false` if no model has that id.
    pub fn set_model_active(&mut self, id: &str, active: bool) -> bool {
        match self.models.iter_mut().find(|m| m.id == id) {
            Some(model) => {
                model.is_active = active;
                true
            }
            None => false,
        }
    }

    /// Active models in insertion order.
    pub fn active_models(&self) -> impl Iterator<Item = &ModelProfile> {
        self.models.iter().filter(|m| m.is_active)
    }

    /// All GPU profiles ordered by id.
    pub fn gpus(&self) -> impl Iterator<Item = &GpuProfile> {
        self.gpus.values()
    }

    /// All grid profiles ordered by region id.
    pub fn grids(&self) -> impl Iterator<Item = &GridProfile> {
        self.grids.values()
    }
}

impl ReferenceCatalog for InMemoryCatalog {
    fn lookup_model(&self, id_or_slug: &str) -> Option<ModelProfile> {
        self.active_models()
            .find(|m| m.id == id_or_slug || m.slug == id_or_slug)
            .cloned()
    }

    fn lookup_gpu(&self, id: &str) -> Option<GpuProfile> {
        self.gpus.get(id).cloned()
    }

    fn lookup_grid(&self, region_id: &str) -> Option<GridProfile> {
        self.grids.get(region_id).cloned()
    }
}
