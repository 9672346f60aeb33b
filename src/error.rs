//! Error types for the scoop library and CLI.
//!
//! The compiler itself (`prompt::render`, `prompt::parse`) never fails; these
//! errors belong to the outer layers: file input, configuration, the store and
//! the CLI checks.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for scoop operations.
#[derive(Error, Debug)]
pub enum ScoopError {
    /// User provided invalid arguments or unreadable input.
    #[error("{0}")]
    UserError(String),

    /// A round-trip check or prompt validation failed.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The persistence collaborator could not complete an operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl ScoopError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScoopError::UserError(_) => exit_codes::USER_ERROR,
            ScoopError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            ScoopError::StoreError(_) => exit_codes::STORE_FAILURE,
        }
    }
}

/// Result type alias for scoop operations.
pub type Result<T> = std::result::Result<T, ScoopError>;
