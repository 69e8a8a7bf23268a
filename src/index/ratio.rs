//! Ratio indexing for level series.

use crate::domain::InvalidPolicy;

/// Index a level series to `values[base_pos] = 100`.
///
/// Output is position-aligned with the input (order-independent math: each
/// element depends only on itself and the base).
///
/// Edge cases, in priority order:
/// - If the base value is absent (`base_pos` out of range) or non-finite or
///   exactly zero, the entire output is zeros. This is the deliberate
///   "can't index, make it visually flat" fallback and it wins over
///   `policy`.
/// - Otherwise an individual non-finite value becomes `None` under
///   [`InvalidPolicy::Skip`] (chart gap) or `Some(0.0)` under
///   [`InvalidPolicy::Zeros`]; all other positions compute normally.
///
/// Full precision is kept; rounding is a presentation concern.
pub fn index_levels(values: &[f64], base_pos: usize, policy: InvalidPolicy) -> Vec<Option<f64>> {
    let base = values.get(base_pos).copied();

    let invalid_base = match base {
        Some(b) => !b.is_finite() || b == 0.0,
        None => true,
    };
    if invalid_base {
        return values.iter().map(|_| Some(0.0)).collect();
    }

    let base = base.unwrap_or(f64::NAN);

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return match policy {
                    InvalidPolicy::Skip => None,
                    InvalidPolicy::Zeros => Some(0.0),
                };
            }
            Some(v / base * 100.0)
        })
        .collect()
}
