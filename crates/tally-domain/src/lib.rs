//! tally-domain
//!
//! Pure domain models (Transaction, drafts, entry forms, view filters).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod form;
pub mod transaction;
pub mod view;

pub use common::*;
pub use form::*;
pub use transaction::*;
pub use view::*;
