//! Verbdeck Library
//!
//! This library provides the core of the Verbdeck verb trainer: the verb
//! catalog, learning-status tracking, search and filtering, incremental
//! reveal and paged retrieval, plus the terminal UI and the HTTP API that
//! are built on top of them.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod pagination;
pub mod services;
pub mod store;
#[cfg(feature = "ratatui")]
pub mod tui;
#[cfg(feature = "web")]
pub mod web;
