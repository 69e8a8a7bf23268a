//! Export the composed table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts. Null slots become empty fields (not `NaN` text), full-precision
//! values are written as-is.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ComposedRow;
use crate::error::AppError;

/// Write the composed index table to a CSV file.
pub fn write_composed_csv(path: &Path, rows: &[ComposedRow]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::runtime(format!("Failed to create '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "year,spx_total_return_idx,pe_aum_idx,sales_idx,msrp_idx,atp_idx,net_worth_idx"
    )
    .map_err(|e| AppError::runtime(format!("Failed to write CSV header: {e}")))?;

    for row in rows {
        let fields: Vec<String> = row
            .series_values()
            .iter()
            .map(|v| v.map(|x| x.to_string()).unwrap_or_default())
            .collect();
        writeln!(file, "{},{}", row.year, fields.join(","))
            .map_err(|e| AppError::runtime(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_export_as_empty_fields() {
        let rows = vec![ComposedRow {
            year: "2013".to_string(),
            spx_total_return_idx: Some(132.4),
            pe_aum_idx: None,
            sales_idx: Some(148.4375),
            msrp_idx: Some(100.0),
            atp_idx: None,
            net_worth_idx: Some(112.5),
        }];

        let dir = std::env::temp_dir().join("wdash-export-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("composed.csv");
        write_composed_csv(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("year,"));
        assert_eq!(lines.next().unwrap(), "2013,132.4,,148.4375,100,,112.5");
    }
}
