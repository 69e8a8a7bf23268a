//! Reporting: run summaries, composed-table rendering, number formatting.
//!
//! Formatting lives here and only here. The pipeline and indexing code emit
//! full-precision floats; rounding and separators are strictly a
//! presentation concern.

pub mod format;

pub use format::{format_composed_table, format_run_summary};
