//! Formatted terminal output.
//!
//! Locale is an explicit value ([`NumberFormat`]) passed into every call —
//! never detected from the host environment — so the numeric pipeline and
//! its tests stay deterministic regardless of where they run.

use clap::ValueEnum;

use crate::app::pipeline::Dashboard;
use crate::domain::{ComposedRow, LoadConfig};

/// Number formatting conventions selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NumberLocale {
    /// 1,234,567.8
    EnUs,
    /// 1.234.567,8
    DeDe,
}

impl NumberLocale {
    pub fn number_format(self) -> NumberFormat {
        match self {
            NumberLocale::EnUs => NumberFormat {
                grouping: ',',
                decimal: '.',
            },
            NumberLocale::DeDe => NumberFormat {
                grouping: '.',
                decimal: ',',
            },
        }
    }
}

/// Separator pair for rendering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub grouping: char,
    pub decimal: char,
}

impl NumberFormat {
    pub const EN_US: Self = Self {
        grouping: ',',
        decimal: '.',
    };
}

/// Render with a fixed number of decimals and grouped integer digits.
pub fn format_number(value: f64, decimals: usize, fmt: &NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let fixed = format!("{value:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(fmt.grouping);
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}{}{f}", fmt.decimal),
        None => format!("{sign}{grouped}"),
    }
}

/// Index values: up to one decimal, trailing zero trimmed (`100`, `132.4`).
pub fn format_index(value: Option<f64>, fmt: &NumberFormat) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    let rounded = (v * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format_number(rounded, 0, fmt)
    } else {
        format_number(rounded, 1, fmt)
    }
}

/// Whole-dollar amounts: `$113,905`.
pub fn format_currency(value: f64, fmt: &NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("${}", format_number(value, 0, fmt))
}

/// Percent with one decimal: `16.0%`.
pub fn format_percent(value: f64, fmt: &NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("{}%", format_number(value, 1, fmt))
}

/// USD trillions with two decimals: `$2.00 T`.
pub fn format_trillions(value: f64, fmt: &NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("${} T", format_number(value, 2, fmt))
}

/// Unit counts, no decimals: `1,408`.
pub fn format_units(value: f64, fmt: &NumberFormat) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format_number(value, 0, fmt)
}

/// Format the run summary (source, row count, year span, warnings).
pub fn format_run_summary(dashboard: &Dashboard, config: &LoadConfig) -> String {
    let mut out = String::new();

    out.push_str("=== wdash - indexed wealth series ===\n");
    out.push_str(&format!("Source: {}\n", dashboard.source));
    match (dashboard.years.first(), dashboard.years.last()) {
        (Some(first), Some(last)) => {
            out.push_str(&format!(
                "Rows: {} | years {first}-{last}\n",
                dashboard.rows.len()
            ));
        }
        _ => out.push_str("Rows: 0 (empty input)\n"),
    }
    out.push_str(&format!(
        "Equity base: {} | invalid points: {:?}\n",
        if config.base_year_included {
            "investment mode (base year's return applied)"
        } else {
            "comparison mode (base year = 100)"
        },
        config.invalid_policy,
    ));

    if !dashboard.warnings.is_empty() {
        out.push_str(&format!("\nWarnings ({}):\n", dashboard.warnings.len()));
        for w in &dashboard.warnings {
            if w.line > 0 {
                out.push_str(&format!("- line {}: {}\n", w.line, w.message));
            } else {
                out.push_str(&format!("- {}\n", w.message));
            }
        }
    }

    out
}

/// Short column headers for the composed table, aligned with
/// [`ComposedRow::series_values`] order.
const TABLE_HEADERS: [&str; 6] = ["SPX TR", "PE AUM", "G Sales", "MSRP", "ATP", "HH NW"];
const COL_WIDTH: usize = 9;

/// Render the composed table as fixed-width text (all columns 2012 = 100).
pub fn format_composed_table(rows: &[ComposedRow], fmt: &NumberFormat) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<6}", "Year"));
    for h in TABLE_HEADERS {
        out.push_str(&format!("{h:>width$}", width = COL_WIDTH));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:<6}", row.year));
        for v in row.series_values() {
            out.push_str(&format!("{:>width$}", format_index(v, fmt), width = COL_WIDTH));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DE_DE: NumberFormat = NumberFormat {
        grouping: '.',
        decimal: ',',
    };

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(1_234_567.891, 1, &NumberFormat::EN_US), "1,234,567.9");
        assert_eq!(format_number(999.0, 0, &NumberFormat::EN_US), "999");
        assert_eq!(format_number(-12_345.0, 0, &NumberFormat::EN_US), "-12,345");
    }

    #[test]
    fn locale_is_an_explicit_argument() {
        assert_eq!(format_number(1_234_567.891, 1, &DE_DE), "1.234.567,9");
        assert_eq!(format_trillions(2.0, &DE_DE), "$2,00 T");
    }

    #[test]
    fn index_formatting_trims_trailing_zero() {
        let f = NumberFormat::EN_US;
        assert_eq!(format_index(Some(100.0), &f), "100");
        assert_eq!(format_index(Some(132.4), &f), "132.4");
        assert_eq!(format_index(Some(150.5388), &f), "150.5");
        assert_eq!(format_index(None, &f), "-");
    }

    #[test]
    fn display_helpers_cover_each_series_kind() {
        let f = NumberFormat::EN_US;
        assert_eq!(format_currency(113_905.0, &f), "$113,905");
        assert_eq!(format_percent(16.0, &f), "16.0%");
        assert_eq!(format_percent(-4.4, &f), "-4.4%");
        assert_eq!(format_trillions(2.0, &f), "$2.00 T");
        assert_eq!(format_units(1408.0, &f), "1,408");
        assert_eq!(format_units(f64::NAN, &f), "N/A");
    }

    #[test]
    fn composed_table_has_one_line_per_row_plus_header() {
        let rows = vec![crate::domain::ComposedRow {
            year: "2012".to_string(),
            spx_total_return_idx: Some(100.0),
            pe_aum_idx: Some(100.0),
            sales_idx: None,
            msrp_idx: Some(100.0),
            atp_idx: Some(100.0),
            net_worth_idx: Some(100.0),
        }];
        let text = format_composed_table(&rows, &NumberFormat::EN_US);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("2012"));
        assert!(text.lines().nth(1).unwrap().contains('-'));
    }
}
