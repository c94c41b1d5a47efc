//! CLI command handlers for Verbdeck.
//!
//! This module provides headless, scriptable access to the verb catalog,
//! learning status and configuration for automation and testing.

pub mod common;
pub mod config;
pub mod list;
#[cfg(feature = "web")]
pub mod serve;
pub mod status;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use list::ListArgs;
#[cfg(feature = "web")]
pub use serve::ServeArgs;
pub use status::StatusArgs;
