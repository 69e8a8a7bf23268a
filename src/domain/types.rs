//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while composing the dashboard table
//! - exported to CSV
//! - handed to the TUI as an immutable per-load snapshot

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One typed observation row, one per calendar year.
///
/// Every field is parsed with the same rule: a source string that is not a
/// valid decimal number becomes `f64::NAN`, never 0. The NaN sentinel
/// propagates through the indexing math, which decides per-algorithm how to
/// degrade (see [`crate::index`]).
///
/// `year` is the natural join key. It is typed like every other field, so a
/// malformed year also arrives here as NaN; the composer rejects that case
/// (a broken join key poisons every series at once).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub year: f64,
    /// S&P 500 calendar-year total return, percent.
    pub spx_total_return_pct: f64,
    /// Global private-equity AUM, USD trillions.
    pub pe_aum_usd_trn: f64,
    /// US G-Class sales, units.
    pub sales_units: f64,
    /// G 550 base MSRP, USD.
    pub msrp_usd: f64,
    /// G-Class estimated average transaction price proxy, USD.
    pub atp_usd: f64,
    /// Pre-computed MSRP index (2012 = 100), supplied by the source data.
    pub msrp_index: f64,
    /// Pre-computed ATP index (2012 = 100), supplied by the source data.
    pub atp_index: f64,
    /// US household net worth, USD billions (Q4).
    pub net_worth_usd_bn: f64,
}

/// A `{year, return%}` pair, the input to compounding indexing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub year: i32,
    pub return_pct: f64,
}

/// A `{year, index level}` pair, the output of compounding indexing.
///
/// Ordering is significant: each level depends on the previous one, so these
/// are always produced and consumed in ascending year order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub year: i32,
    pub index: f64,
}

/// What ratio indexing emits for an individual invalid (non-finite) value.
///
/// This does not apply to an invalid *base* value, which always zeroes the
/// entire output series regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPolicy {
    /// Emit a null point so the chart shows a gap (default).
    Skip,
    /// Emit a literal 0 so the chart shows a flat floor.
    Zeros,
}

/// One composed per-year record, the sole interface the rendering layer
/// consumes.
///
/// This is a fixed struct rather than a string-keyed map so every series
/// producer and every chart consumer agree on the field set at compile time.
/// A series missing data for a year is `None` in its slot, not an absent
/// key; chart code renders `None` as a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedRow {
    /// String form of the year, for categorical x-axis alignment.
    pub year: String,
    /// Cumulative S&P 500 total return index (2012 = 100, compounded).
    pub spx_total_return_idx: Option<f64>,
    /// Global PE AUM, ratio-indexed to 2012 = 100.
    pub pe_aum_idx: Option<f64>,
    /// US G-Class sales, ratio-indexed to 2012 = 100.
    pub sales_idx: Option<f64>,
    /// G 550 MSRP index — source-provided, authoritative.
    pub msrp_idx: Option<f64>,
    /// G-Class est. ATP index — source-provided, authoritative.
    pub atp_idx: Option<f64>,
    /// Household net worth, ratio-indexed to 2012 = 100.
    pub net_worth_idx: Option<f64>,
}

impl ComposedRow {
    /// Series labels in display order, paired with a field accessor.
    ///
    /// Keeping the label table next to the struct makes it hard for the
    /// table/chart/export layers to drift out of sync with the field set.
    pub const SERIES_LABELS: [&'static str; 6] = [
        "S&P 500 total return index (2012 = 100)",
        "Global PE AUM (index, 2012 = 100)",
        "US G-Class sales (index, 2012 = 100)",
        "G 550 MSRP (index, 2012 = 100)",
        "G-Class Est. ATP (index, 2012 = 100)",
        "Household net worth (index, 2012 = 100)",
    ];

    /// Field values in the same order as [`Self::SERIES_LABELS`].
    pub fn series_values(&self) -> [Option<f64>; 6] {
        [
            self.spx_total_return_idx,
            self.pe_aum_idx,
            self.sales_idx,
            self.msrp_idx,
            self.atp_idx,
            self.net_worth_idx,
        ]
    }
}

/// A run's configuration as understood by the pipeline (derived from CLI
/// flags plus defaults).
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Where the CSV text comes from.
    pub source: crate::data::DataSource,
    /// Fold the base year's own return into the compounded base value.
    ///
    /// `false` is "comparison mode" (base year reads exactly 100);
    /// `true` is "investment mode" ($100 at the start of the base year).
    /// The composed table always uses comparison mode; the investment series
    /// is computed alongside for the cumulative-return view.
    pub base_year_included: bool,
    /// Per-point invalid-value policy for ratio indexing.
    pub invalid_policy: InvalidPolicy,
    /// Position of the base year within the row set (normally 0 = first year).
    pub base_position: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            source: crate::data::DataSource::Sample,
            base_year_included: false,
            invalid_policy: InvalidPolicy::Skip,
            base_position: 0,
        }
    }
}
