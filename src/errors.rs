use tally_config::ConfigError;
use tally_core::CoreError;
use thiserror::Error;

/// Unified error type for the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Validation and not-found failures leave the state untouched and can be retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Core(err) if err.is_recoverable())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Core(CoreError::from(err))
    }
}
