use thiserror::Error;

/// Errors raised by malformed registration calls.
///
/// All variants belong to the "Invariant Violation" class: they are thrown
/// synchronously at the call site and leave the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Invariant Violation: {message}")]
    InvalidStore { message: String },

    #[error("Invariant Violation: reducer name '{name}' must be a non-empty string")]
    InvalidReducerName { name: String },

    #[error("Invariant Violation: {message}")]
    InvalidLogic { message: String },
}

impl RegistryError {
    /// Error class name shared by every variant.
    pub fn name(&self) -> &'static str {
        "Invariant Violation"
    }
}
