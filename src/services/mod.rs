//! Service layer for business logic.
//!
//! This module contains the pieces that sit between the raw catalog and the
//! views: status tracking, filtering, and the persisted theme choice.

pub mod filter;
pub mod ledger;
pub mod theme_pref;

// Re-export commonly used types and functions
pub use filter::{filter_verbs, FilterState};
pub use ledger::{StatusCounts, StatusLedger};
pub use theme_pref::ThemePreference;
