//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` DTO for inserts where the API creates rows
//! - Conversions into the engine's profile types where the row feeds
//!   the calculator

pub mod ai_model;
pub mod calculation_log;
pub mod gpu_profile;
pub mod grid_intensity;
pub mod organization;

use ecoscore_core::error::CoreError;

/// Narrow a signed database integer into the unsigned field the engine
/// expects, naming the column on failure.
pub(crate) fn narrow<T, U>(value: T, column: &str) -> Result<U, CoreError>
where
    T: Copy + std::fmt::Display,
    U: TryFrom<T>,
{
    U::try_from(value)
        .map_err(|_| CoreError::InvalidInput(format!("Column {column} out of range: {value}")))
}

/// Wrap a row conversion failure so it flows through `sqlx::Error`.
pub(crate) fn decode_error(err: CoreError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}
