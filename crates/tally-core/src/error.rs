use std::io;

use tally_domain::{TransactionId, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CoreError {
    /// Returns `true` for failures the controller recovers from locally.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::NotFound(_))
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<io::Error> for CoreError {
    fn from(err: io::Error) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Persistence(err.to_string())
    }
}
