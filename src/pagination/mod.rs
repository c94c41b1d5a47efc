//! Controllers that decide how much of the verb list is materialized.
//!
//! - [`RevealWindow`] grows a prefix over a fully loaded, filtered list.
//! - [`PagedLoader`] / [`BackgroundPager`] fetch the catalog page by page
//!   from a [`PageSource`] (in-process catalog or the web API).

pub mod paged;
pub mod reveal;
pub mod source;

pub use paged::{BackgroundPager, LoadMode, PageRequest, PagedLoader, LOAD_ERROR_MESSAGE};
pub use reveal::RevealWindow;
pub use source::{CatalogSource, HttpSource, PageError, PageSource};
