//! Shared load pipeline used by both the CLI and TUI front-ends.
//!
//! One load cycle is: fetch text -> parse/type -> index -> compose. The
//! pipeline is synchronous and pure past the fetch; everything it produces
//! lands in an immutable [`Dashboard`] snapshot that is rebuilt from scratch
//! on every load (there is no incremental update model).
//!
//! [`Loader`] wraps the cycle in the three user-visible states (loading,
//! ready, failed) and carries a generation counter so the results of an
//! abandoned load can never overwrite a newer load's state.

use crate::compose::{self, DerivedSeries};
use crate::domain::{ComposedRow, IndexPoint, LoadConfig, ReturnPoint, SeriesRow};
use crate::error::AppError;
use crate::index::{build_total_return_index, index_levels};
use crate::io::ingest::{self, RowWarning};

/// All computed outputs of a single load, handed to the rendering layer as
/// an immutable snapshot.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub rows: Vec<SeriesRow>,
    pub years: Vec<i32>,
    pub composed: Vec<ComposedRow>,
    /// Comparison mode: base year = 100, compounding starts the year after.
    pub spx_comparison: Vec<IndexPoint>,
    /// Investment mode: $100 at the start of the base year, its return applied.
    pub spx_investment: Vec<IndexPoint>,
    pub warnings: Vec<RowWarning>,
    /// Human-readable origin of the data, for the summary/status line.
    pub source: String,
}

/// Fetch the configured source and run the full pipeline.
pub fn run_load(config: &LoadConfig) -> Result<Dashboard, AppError> {
    let text = config.source.fetch_text()?;
    run_with_text(config, &text)
}

/// Run the pipeline over already-fetched CSV text.
///
/// Split out so the TUI can recompute with new settings without refetching,
/// and so tests can drive the whole pipeline from a string.
pub fn run_with_text(config: &LoadConfig, text: &str) -> Result<Dashboard, AppError> {
    let ingested = ingest::ingest_csv(text)?;
    let rows = ingested.rows;
    let mut warnings = ingested.warnings;

    // The join key must be sound before anything is derived from it.
    let years = compose::validate_years(&rows)?;

    let returns: Vec<ReturnPoint> = years
        .iter()
        .zip(&rows)
        .map(|(&year, row)| ReturnPoint {
            year,
            return_pct: row.spx_total_return_pct,
        })
        .collect();

    // Both compounding conventions are produced every load; the configured
    // one feeds the composed table.
    let spx_comparison = build_total_return_index(&returns, 100.0, false);
    let spx_investment = build_total_return_index(&returns, 100.0, true);

    // The compounded series always starts at the first year; when the table
    // is anchored elsewhere (base_position > 0), rebase it so the anchor
    // year reads exactly 100 like the ratio-indexed series do. An anchor
    // year that was skipped by the compounder degrades to a warning.
    let mut spx_for_table = if config.base_year_included {
        spx_investment.clone()
    } else {
        spx_comparison.clone()
    };
    if config.base_position > 0 {
        if let Some(&anchor) = years.get(config.base_position) {
            if let Err(e) = crate::index::rebase(&mut spx_for_table, anchor, 100.0) {
                warnings.push(RowWarning {
                    line: 0,
                    message: format!("Could not rebase the return index: {e}"),
                });
            }
        }
    }

    let pick = |field: fn(&SeriesRow) -> f64| -> Vec<f64> { rows.iter().map(field).collect() };

    let derived = DerivedSeries {
        spx_cum: spx_for_table,
        pe_aum_idx: index_levels(
            &pick(|r| r.pe_aum_usd_trn),
            config.base_position,
            config.invalid_policy,
        ),
        sales_idx: index_levels(
            &pick(|r| r.sales_units),
            config.base_position,
            config.invalid_policy,
        ),
        net_worth_idx: index_levels(
            &pick(|r| r.net_worth_usd_bn),
            config.base_position,
            config.invalid_policy,
        ),
    };

    let composed = compose::compose(&rows, &derived, &mut warnings)?;

    Ok(Dashboard {
        rows,
        years,
        composed,
        spx_comparison,
        spx_investment,
        warnings,
        source: config.source.describe(),
    })
}

/// User-visible state of the current load.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Box<Dashboard>),
    Failed(String),
}

/// Generation-checked load state holder.
///
/// At most one load is in flight per session; a retry supersedes (never
/// races) the previous one by bumping the generation. A [`Loader::finish`]
/// carrying a stale generation is dropped.
#[derive(Debug)]
pub struct Loader {
    generation: u64,
    state: LoadState,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: LoadState::Loading,
        }
    }

    /// Start (or restart) a load: resets to the loading state and returns
    /// the ticket the eventual `finish` must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    /// Deliver a load result. Returns `false` (and changes nothing) if a
    /// newer load has superseded this ticket.
    pub fn finish(&mut self, ticket: u64, result: Result<Dashboard, AppError>) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.state = match result {
            Ok(dashboard) => LoadState::Ready(Box::new(dashboard)),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.state {
            LoadState::Ready(d) => Some(d),
            _ => None,
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
