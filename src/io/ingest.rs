//! CSV ingest and row typing.
//!
//! This module turns raw CSV text into typed [`SeriesRow`]s that are safe to
//! feed to the indexing code.
//!
//! Design goals:
//! - **No quoting/escaping**: fields are split on commas only. A comma inside
//!   a value is not supported; this is a documented limitation of the data
//!   contract, so the reader runs with quoting disabled.
//! - **Degrade, don't throw**: a field that does not parse as a decimal
//!   number becomes `f64::NAN` (never 0) and the load continues. Oddities are
//!   collected as [`RowWarning`]s for the run summary.
//! - **Shape tolerance**: a data line with fewer columns than the header
//!   reads as empty strings for the missing trailing fields (which type to
//!   NaN); extra columns are dropped; blank lines are skipped.
//! - Empty input yields an empty row set, not an error.

use std::collections::HashMap;

use csv::StringRecord;

use crate::domain::SeriesRow;
use crate::error::AppError;

/// Expected numeric columns. `year` is typed like the rest; the composer is
/// the stage that rejects a non-finite year.
const EXPECTED_COLUMNS: [&str; 9] = [
    "year",
    "sp500_total_return_pct",
    "global_pe_aum_usd_trn",
    "us_gclass_sales_units",
    "g550_base_msrp_usd",
    "gclass_est_atp_usd_proxy",
    "g550_msrp_index_2012",
    "gclass_est_atp_index_2012",
    "hh_net_worth_usd_bn_q4",
];

/// A non-fatal issue encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowWarning {
    /// 1-based CSV line number, or 0 for file-level issues.
    pub line: usize,
    pub message: String,
}

/// Ingest output: typed rows plus collected warnings.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub rows: Vec<SeriesRow>,
    pub warnings: Vec<RowWarning>,
    pub rows_read: usize,
}

/// Parse CSV text and type every row.
///
/// The only error this can return is a reader-level failure on the header
/// line; per-row problems degrade to NaN fields plus warnings.
pub fn ingest_csv(text: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::data(format!("Failed to read CSV header: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);

    let mut warnings = Vec::new();

    // Columns absent from the header make a whole series NaN. That is not
    // fatal (the chart degrades per series), but it should be visible.
    if !header_map.is_empty() {
        for name in EXPECTED_COLUMNS {
            if !header_map.contains_key(name) {
                warnings.push(RowWarning {
                    line: 1,
                    message: format!("Missing expected column `{name}`; series will be empty."),
                });
            }
        }
    }

    let mut rows = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warnings.push(RowWarning {
                    line,
                    message: format!("CSV read error: {e}"),
                });
                continue;
            }
        };

        // A line of nothing but commas/whitespace is noise, not a year.
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        if record.len() > headers.len() && !headers.is_empty() {
            warnings.push(RowWarning {
                line,
                message: format!(
                    "Row has {} columns, header has {}; extras dropped.",
                    record.len(),
                    headers.len()
                ),
            });
        }

        rows.push(type_row(&record, &header_map));
    }

    Ok(IngestedData {
        rows,
        warnings,
        rows_read,
    })
}

/// Convert one raw record into a typed row.
///
/// Each named field goes through [`parse_field`]; a field whose column is
/// missing from the header, whose value is absent (short row), or whose value
/// is not a decimal number arrives as NaN.
fn type_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> SeriesRow {
    let field = |name: &str| parse_field(get_field(record, header_map, name));

    SeriesRow {
        year: field("year"),
        spx_total_return_pct: field("sp500_total_return_pct"),
        pe_aum_usd_trn: field("global_pe_aum_usd_trn"),
        sales_units: field("us_gclass_sales_units"),
        msrp_usd: field("g550_base_msrp_usd"),
        atp_usd: field("gclass_est_atp_usd_proxy"),
        msrp_index: field("g550_msrp_index_2012"),
        atp_index: field("gclass_est_atp_index_2012"),
        net_worth_usd_bn: field("hh_net_worth_usd_bn_q4"),
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, the `year` column silently
    // disappears and every join fails.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_field<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> &'a str {
    header_map
        .get(name)
        .and_then(|idx| record.get(*idx))
        .unwrap_or("")
}

/// Standard decimal parsing with the NaN sentinel for anything else.
///
/// Parsed non-finite values (`inf`, `nan` spelled out in the file) pass
/// through untouched; the indexing code owns the policy for those.
fn parse_field(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}
