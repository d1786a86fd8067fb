//! Line-oriented terminal front end for the tracker.

pub mod commands;
pub mod output;
pub mod shell;
pub mod surface;

pub use shell::{run_cli, CliError, CliMode};
pub use surface::TerminalSurface;
