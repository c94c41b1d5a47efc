//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the keys used in the local store.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Verbdeck";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "verbdeck";

/// Local store key holding the JSON map of verb → status.
pub const STATUS_STORAGE_KEY: &str = "verbdeck:verb-status";

/// Local store key holding the theme preference (`light` or `dark`).
pub const THEME_STORAGE_KEY: &str = "verbdeck:theme";

/// Default number of verbs requested per page from the web API.
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// Largest page the web API will return.
pub const MAX_PAGE_SIZE: usize = 100;

/// Rows shown in the verb table before any growth.
pub const DEFAULT_INITIAL_REVEAL: usize = 60;

/// Rows added to the verb table on each growth.
pub const DEFAULT_REVEAL_STEP: usize = 60;
