//! Repository layer for database CRUD operations.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod ai_model_repo;
pub mod calculation_log_repo;
pub mod catalog_repo;
pub mod gpu_profile_repo;
pub mod grid_intensity_repo;
pub mod organization_repo;

pub use ai_model_repo::AiModelRepo;
pub use calculation_log_repo::CalculationLogRepo;
pub use catalog_repo::CatalogRepo;
pub use gpu_profile_repo::GpuProfileRepo;
pub use grid_intensity_repo::GridIntensityRepo;
pub use organization_repo::OrganizationRepo;
