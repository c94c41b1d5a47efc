//! Shared CLI plumbing: exit codes and the command error type.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::services::StatusLedger;
use crate::store::FileStore;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad arguments or invalid values
    ValidationError = 1,
    /// File, data or network failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// A user or validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// An I/O or data error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result alias for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration, treating a broken config file as a user error.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Resolves which data file to read: `--data`, then `paths.data_file`.
///
/// `None` means the bundled catalog.
pub fn resolve_data_file(data: Option<&Path>) -> CliResult<Option<PathBuf>> {
    match data {
        Some(path) => Ok(Some(path.to_path_buf())),
        None => Ok(load_config()?.paths.data_file),
    }
}

/// Loads the verb catalog for a command.
pub fn load_catalog(data: Option<&Path>) -> CliResult<Catalog> {
    let data_file = resolve_data_file(data)?;
    Catalog::load_or_bundled(data_file.as_deref())
        .map_err(|e| CliError::io(format!("Failed to load verbs: {e}")))
}

/// Opens the status ledger in the default state file.
pub fn open_ledger() -> CliResult<StatusLedger<FileStore>> {
    let store = FileStore::open_default()
        .map_err(|e| CliError::io(format!("Failed to locate state file: {e:#}")))?;
    Ok(StatusLedger::load(store))
}
