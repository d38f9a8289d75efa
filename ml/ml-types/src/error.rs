//! Error types for ml-types crate.

use thiserror::Error;

/// Errors that can occur in ml-types operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlTypesError {
    /// Invalid confidence value.
    #[error("invalid confidence {value}: must be in [0, 1]")]
    InvalidConfidence {
        /// The invalid confidence value.
        value: f32,
    },
}

impl MlTypesError {
    /// Creates an invalid confidence error.
    #[must_use]
    pub const fn invalid_confidence(value: f32) -> Self {
        Self::InvalidConfidence { value }
    }
}

/// Result type for ml-types operations.
pub type Result<T> = std::result::Result<T, MlTypesError>;
