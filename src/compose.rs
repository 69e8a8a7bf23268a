//! Composition: join typed rows and index outputs into one aligned table.
//!
//! The composer is the one stage allowed to reject data outright, and only
//! for a broken join key: a non-integral/NaN `year` or a duplicate `year`
//! poisons every series at once, so the load fails with a single message.
//! Everything else degrades to `None` slots.
//!
//! A derived series that has no entry for a year contributes `None` for that
//! slot (plus a collected warning), never an absent field and never an
//! error. The pre-computed MSRP/ATP index columns from the source data are
//! authoritative: they are passed through as-is and never recomputed, so a
//! recomputation can't silently diverge from them.

use std::collections::{HashMap, HashSet};

use crate::domain::{ComposedRow, IndexPoint, SeriesRow};
use crate::error::AppError;
use crate::io::ingest::RowWarning;

/// Position-aligned and year-keyed index outputs feeding the composed table.
#[derive(Debug, Clone, Default)]
pub struct DerivedSeries {
    /// Cumulative S&P 500 total return index, keyed by year.
    pub spx_cum: Vec<IndexPoint>,
    /// Ratio-indexed level series, position-aligned with the typed rows.
    pub pe_aum_idx: Vec<Option<f64>>,
    pub sales_idx: Vec<Option<f64>>,
    pub net_worth_idx: Vec<Option<f64>>,
}

/// Validate the join key across all rows and return the years as integers.
///
/// Fails on a non-finite year (an unparseable year string propagates here as
/// NaN), a non-integral year, or a duplicate year.
pub fn validate_years(rows: &[SeriesRow]) -> Result<Vec<i32>, AppError> {
    let mut years = Vec::with_capacity(rows.len());
    let mut seen = HashSet::new();

    for (i, row) in rows.iter().enumerate() {
        if !row.year.is_finite() || row.year.fract() != 0.0 {
            return Err(AppError::data(format!(
                "Row {} has a malformed year ({}).",
                i + 1,
                row.year
            )));
        }
        let year = row.year as i32;
        if !seen.insert(year) {
            return Err(AppError::data(format!("Duplicate year {year} in input.")));
        }
        years.push(year);
    }

    Ok(years)
}

/// Join typed rows with the derived index series into one row per year.
///
/// Output always contains exactly one [`ComposedRow`] per input row, in
/// input order. Non-fatal join gaps are appended to `warnings`.
pub fn compose(
    rows: &[SeriesRow],
    derived: &DerivedSeries,
    warnings: &mut Vec<RowWarning>,
) -> Result<Vec<ComposedRow>, AppError> {
    let years = validate_years(rows)?;

    let spx_by_year: HashMap<i32, f64> = derived
        .spx_cum
        .iter()
        .map(|p| (p.year, p.index))
        .collect();

    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let year = years[i];

        let spx = spx_by_year.get(&year).copied();
        if spx.is_none() {
            warnings.push(RowWarning {
                line: 0,
                message: format!(
                    "Year {year} missing from the compounded return series; charting a gap."
                ),
            });
        }

        out.push(ComposedRow {
            year: year.to_string(),
            spx_total_return_idx: spx,
            pe_aum_idx: aligned(&derived.pe_aum_idx, i),
            sales_idx: aligned(&derived.sales_idx, i),
            // Source-provided indices are primary; NaN from the source means
            // the slot is simply absent.
            msrp_idx: finite_or_none(row.msrp_index),
            atp_idx: finite_or_none(row.atp_index),
            net_worth_idx: aligned(&derived.net_worth_idx, i),
        });
    }

    Ok(out)
}

fn aligned(series: &[Option<f64>], i: usize) -> Option<f64> {
    series.get(i).copied().flatten()
}

fn finite_or_none(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvalidPolicy, ReturnPoint};
    use crate::index::{build_total_return_index, index_levels};

    fn row(year: f64) -> SeriesRow {
        SeriesRow {
            year,
            spx_total_return_pct: 10.0,
            pe_aum_usd_trn: 2.0,
            sales_units: 1000.0,
            msrp_usd: 113_000.0,
            atp_usd: 125_000.0,
            msrp_index: 100.0,
            atp_index: 100.0,
            net_worth_usd_bn: 70_000.0,
        }
    }

    fn derived_for(rows: &[SeriesRow]) -> DerivedSeries {
        let returns: Vec<ReturnPoint> = rows
            .iter()
            .map(|r| ReturnPoint {
                year: r.year as i32,
                return_pct: r.spx_total_return_pct,
            })
            .collect();
        let levels: Vec<f64> = rows.iter().map(|r| r.pe_aum_usd_trn).collect();
        DerivedSeries {
            spx_cum: build_total_return_index(&returns, 100.0, false),
            pe_aum_idx: index_levels(&levels, 0, InvalidPolicy::Skip),
            sales_idx: index_levels(
                &rows.iter().map(|r| r.sales_units).collect::<Vec<_>>(),
                0,
                InvalidPolicy::Skip,
            ),
            net_worth_idx: index_levels(
                &rows.iter().map(|r| r.net_worth_usd_bn).collect::<Vec<_>>(),
                0,
                InvalidPolicy::Skip,
            ),
        }
    }

    #[test]
    fn one_composed_row_per_year_in_input_order() {
        let rows = vec![row(2012.0), row(2013.0), row(2014.0)];
        let derived = derived_for(&rows);
        let mut warnings = Vec::new();
        let out = compose(&rows, &derived, &mut warnings).unwrap();

        assert_eq!(out.len(), 3);
        let years: Vec<&str> = out.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, vec!["2012", "2013", "2014"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn malformed_year_is_fatal() {
        let rows = vec![row(f64::NAN)];
        let err = compose(&rows, &DerivedSeries::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("malformed year"));
    }

    #[test]
    fn duplicate_year_is_fatal() {
        let rows = vec![row(2012.0), row(2012.0)];
        let err = compose(&rows, &DerivedSeries::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Duplicate year"));
    }

    #[test]
    fn missing_derived_year_becomes_null_with_warning() {
        let rows = vec![row(2012.0), row(2013.0)];
        let mut derived = derived_for(&rows);
        // Drop 2013 from the compounded series, as happens when its return
        // was non-finite and the compounder skipped the point.
        derived.spx_cum.retain(|p| p.year != 2013);

        let mut warnings = Vec::new();
        let out = compose(&rows, &derived, &mut warnings).unwrap();

        assert!(out[0].spx_total_return_idx.is_some());
        assert_eq!(out[1].spx_total_return_idx, None);
        assert!(warnings.iter().any(|w| w.message.contains("2013")));
    }

    #[test]
    fn source_provided_indices_are_authoritative() {
        let mut r = row(2013.0);
        r.msrp_index = 104.4; // from the CSV, not recomputed
        r.atp_index = f64::NAN; // absent in the CSV
        let rows = vec![row(2012.0), r];
        let derived = derived_for(&rows);

        let out = compose(&rows, &derived, &mut Vec::new()).unwrap();
        assert_eq!(out[1].msrp_idx, Some(104.4));
        assert_eq!(out[1].atp_idx, None);
    }

    #[test]
    fn series_labels_and_values_stay_in_sync() {
        let rows = vec![row(2012.0)];
        let derived = derived_for(&rows);
        let out = compose(&rows, &derived, &mut Vec::new()).unwrap();
        assert_eq!(
            out[0].series_values().len(),
            ComposedRow::SERIES_LABELS.len()
        );
    }
}
