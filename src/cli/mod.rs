//! Command-line parsing for the wealth-series dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/indexing code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::InvalidPolicy;
use crate::report::format::NumberLocale;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "wdash",
    version,
    about = "Indexed wealth-series dashboard (terminal)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI dashboard (the default).
    Show(DataArgs),
    /// Print the run summary and the composed index table.
    Table(TableArgs),
    /// Export the composed index table to CSV.
    Export(ExportArgs),
}

/// Options shared by every command that loads data.
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// CSV source: a http(s) URL or a local file path.
    ///
    /// Falls back to the WDASH_DATA_URL environment variable (a .env file is
    /// honored), then to the bundled sample dataset.
    #[arg(short = 'd', long, value_name = "URL|PATH")]
    pub data: Option<String>,

    /// Force the bundled 2012-2024 sample dataset (ignores --data and env).
    #[arg(long)]
    pub sample: bool,

    /// Fold the base year's own return into the compounded equity base
    /// ("investment mode"; the base year then reads above/below 100).
    #[arg(long)]
    pub include_base_year: bool,

    /// What ratio indexing emits for an individual invalid value.
    #[arg(long, value_enum, default_value_t = InvalidPolicy::Skip)]
    pub invalid_policy: InvalidPolicy,

    /// Position of the base year within the row set (0 = first year).
    #[arg(long, default_value_t = 0)]
    pub base_position: usize,
}

/// Options for `wdash table`.
#[derive(Debug, Parser)]
pub struct TableArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number formatting convention for displayed values.
    #[arg(long, value_enum, default_value_t = NumberLocale::EnUs)]
    pub locale: NumberLocale,
}

/// Options for `wdash export`.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}
