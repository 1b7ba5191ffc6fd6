//! Validation errors raised while building an [`ApConfig`](crate::ApConfig).

use thiserror::Error;

/// Errors raised when access point parameters fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required field was never supplied.
    #[error("'{field}' is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field was supplied but contained no characters.
    #[error("'{field}' must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
}
