//! Compounding indexing for return series, plus anchor-year rebasing.

use crate::domain::{IndexPoint, ReturnPoint};
use crate::error::AppError;

/// Build a cumulative index from annual return percentages.
///
/// The running level starts at `base` and each emitted point multiplies the
/// prior level by `1 + return_pct / 100`. Input must already be in ascending
/// year order; output order follows input order.
///
/// `base_year_included` controls the very first point:
/// - `false` (comparison mode): the first point is emitted as exactly `base`
///   with no return applied, and the level is left unchanged.
/// - `true` (investment mode): the first year's return is applied to the
///   base before emitting, as if the money were invested at the start of
///   that year.
///
/// A non-finite return is skipped entirely: no point is emitted for that
/// year and the level is untouched. This is intentionally different from
/// ratio indexing, which keeps invalid points present as nulls — a return
/// only means anything relative to its neighbor, so a bad one contributes
/// nothing to the accumulation. Note the skip also applies to the first
/// position: if the first return is non-finite, no base point is emitted and
/// compounding starts at the next valid return.
///
/// Empty input yields empty output. Levels are full-precision floats; any
/// rounding happens at the display layer.
pub fn build_total_return_index(
    series: &[ReturnPoint],
    base: f64,
    base_year_included: bool,
) -> Vec<IndexPoint> {
    let mut out = Vec::with_capacity(series.len());
    let mut level = base;

    for (i, point) in series.iter().enumerate() {
        if !point.return_pct.is_finite() {
            continue;
        }

        if i == 0 && !base_year_included {
            out.push(IndexPoint {
                year: point.year,
                index: level,
            });
            continue;
        }

        level *= 1.0 + point.return_pct / 100.0;
        out.push(IndexPoint {
            year: point.year,
            index: level,
        });
    }

    out
}

/// Rescale a series so the anchor year reads exactly `target`.
///
/// Some call sites compound from a different starting point and still need
/// the chart anchored at `target = 100` in a specific year. If the anchor
/// year's value already equals the target the series is left byte-for-byte
/// unchanged (rebasing is idempotent); otherwise every point is multiplied
/// by `target / anchor_value`.
pub fn rebase(points: &mut [IndexPoint], anchor_year: i32, target: f64) -> Result<(), AppError> {
    let anchor = points
        .iter()
        .find(|p| p.year == anchor_year)
        .map(|p| p.index)
        .ok_or_else(|| AppError::data(format!("Anchor year {anchor_year} not found in series.")))?;

    if !anchor.is_finite() || anchor == 0.0 {
        return Err(AppError::data(format!(
            "Anchor year {anchor_year} has an unusable index value ({anchor})."
        )));
    }

    if anchor == target {
        return Ok(());
    }

    let ratio = target / anchor;
    for p in points.iter_mut() {
        p.index *= ratio;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(i32, f64)]) -> Vec<ReturnPoint> {
        pairs
            .iter()
            .map(|&(year, return_pct)| ReturnPoint { year, return_pct })
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn compounds_with_base_year_included() {
        let series = pts(&[(2012, 16.0), (2013, 32.4), (2014, 13.7)]);
        let out = build_total_return_index(&series, 100.0, true);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].year, 2012);
        assert_close(out[0].index, 116.0);
        assert_close(out[1].index, 153.584);
        assert_close(out[2].index, 174.625008);
    }

    #[test]
    fn base_year_excluded_emits_base_unchanged() {
        let series = pts(&[(2012, 16.0), (2013, 32.4)]);
        let out = build_total_return_index(&series, 100.0, false);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], IndexPoint { year: 2012, index: 100.0 });
        assert_close(out[1].index, 132.4);
    }

    #[test]
    fn handles_negative_returns() {
        let series = pts(&[(2018, -4.4), (2019, 31.5)]);
        let out = build_total_return_index(&series, 100.0, true);

        assert_close(out[0].index, 95.6);
        assert_close(out[1].index, 125.714);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(build_total_return_index(&[], 100.0, true).is_empty());
    }

    #[test]
    fn non_finite_return_is_omitted_and_level_unchanged() {
        // Contrast with ratio indexing: there a bad point stays present as a
        // null; here it disappears from the output and the 2014 level picks
        // up exactly where 2012 left off.
        let series = pts(&[(2012, 16.0), (2013, f64::NAN), (2014, 10.0)]);
        let out = build_total_return_index(&series, 100.0, true);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].year, 2012);
        assert_close(out[0].index, 116.0);
        assert_eq!(out[1].year, 2014);
        assert_close(out[1].index, 127.6);
    }

    #[test]
    fn non_finite_first_return_skips_the_base_point_too() {
        let series = pts(&[(2012, f64::NAN), (2013, 10.0)]);
        let out = build_total_return_index(&series, 100.0, false);

        // Position 0 was skipped, so no unchanged base point is emitted and
        // 2013 compounds directly off the base.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].year, 2013);
        assert_close(out[0].index, 110.0);
    }

    #[test]
    fn full_series_comparison_mode() {
        let series = pts(&[
            (2012, 16.0),
            (2013, 32.4),
            (2014, 13.7),
            (2015, 1.4),
            (2016, 12.0),
            (2017, 21.8),
            (2018, -4.4),
            (2019, 31.5),
            (2020, 18.4),
            (2021, 28.7),
            (2022, -18.1),
            (2023, 26.3),
            (2024, 25.0),
        ]);
        let out = build_total_return_index(&series, 100.0, false);

        assert_eq!(out.len(), 13);
        assert_close(out[0].index, 100.0);
        assert_close(out[1].index, 132.4);
        assert_close(out[2].index, 150.5388);
        assert_close(out[12].index, 515.778_073_248_968_9);
    }

    #[test]
    fn rebasing_is_idempotent_at_the_anchor() {
        let mut points = vec![
            IndexPoint { year: 2012, index: 100.0 },
            IndexPoint { year: 2013, index: 132.4 },
        ];
        let before = points.clone();
        rebase(&mut points, 2012, 100.0).unwrap();
        assert_eq!(points, before);
    }

    #[test]
    fn rebasing_scales_every_point() {
        let mut points = vec![
            IndexPoint { year: 2012, index: 116.0 },
            IndexPoint { year: 2013, index: 153.584 },
        ];
        rebase(&mut points, 2012, 100.0).unwrap();
        assert_close(points[0].index, 100.0);
        assert_close(points[1].index, 132.4);
    }

    #[test]
    fn rebasing_missing_anchor_is_an_error() {
        let mut points = vec![IndexPoint { year: 2013, index: 132.4 }];
        assert!(rebase(&mut points, 2012, 100.0).is_err());
    }
}
