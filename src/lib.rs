//! `wealth-dash` library crate.
//!
//! The binary (`wdash`) is a thin wrapper around this library so that:
//!
//! - the normalization/indexing pipeline is testable without spawning processes
//! - modules are reusable (e.g., a future web/daemon front-end)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod compose;
pub mod data;
pub mod domain;
pub mod error;
pub mod index;
pub mod io;
pub mod report;
pub mod tui;
