/// Errors raised by the calculation engine.
///
/// Every engine operation is a pure function of its inputs and the catalog,
/// so a failure never leaves partial state behind; the caller decides how to
/// surface it (e.g. 404 vs 400).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// An unresolvable model, GPU, or region reference.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A value outside its documented numeric range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation is not permitted on this record (e.g. editing a
    /// predefined model).
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] carrying the requested id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
