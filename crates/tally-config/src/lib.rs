//! tally-config
//!
//! User preferences for the tracker: storage location, currency symbol,
//! save-failure policy and the initial filter.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, SaveFailurePolicy};
