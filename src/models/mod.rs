//! Data models for verbs, learning status, and catalog pages.
//!
//! These types are shared by the catalog loader, the status ledger, the
//! web API, and the terminal UI. They carry no I/O of their own.

pub mod page;
pub mod status;
pub mod verb;

pub use page::VerbPage;
pub use status::Status;
pub use verb::{VerbRecord, VerbType, MISSING_MEANING_PLACEHOLDER};
