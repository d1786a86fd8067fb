//! tally-core
//!
//! Business logic for the transaction log: the store, aggregation, view
//! projection and the persistence adapter.
//! Depends on tally-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod error;
pub mod projection_service;
pub mod storage;
pub mod store;
pub mod summary_service;
pub mod time;

pub use error::CoreError;
pub use projection_service::*;
pub use storage::*;
pub use store::*;
pub use summary_service::*;
pub use time::*;

#[cfg(test)]
mod tests;
