#![doc(test(attr(deny(warnings))))]

//! Tally is a personal finance tracker: an ordered transaction log with
//! balance totals, a per-category expense breakdown, filtered views and
//! key-value persistence, driven by a command-based controller.

pub mod cli;
pub mod controller;
pub mod errors;
pub mod format;
pub mod paths;
pub mod utils;

pub use controller::{
    AppController, AppState, Command, DashboardView, DispatchOutcome, RenderSurface,
};
pub use errors::AppError;
pub use tally_config::{Config, ConfigManager, SaveFailurePolicy};
pub use tally_core::{
    CategoryBreakdown, Clock, CoreError, FixedClock, KeyValueStore, MemoryKeyValueStore,
    SystemClock, Totals, TransactionRepository, TransactionStore,
};
pub use tally_domain::{
    Filter, Theme, Transaction, TransactionDraft, TransactionForm, TransactionId,
    TransactionKind,
};
pub use tally_storage_json::JsonFileStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
