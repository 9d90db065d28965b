//! CSV files read as single sheets.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::sheet::RawSheet;

fn normalize_cell(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}')
}

/// Reads a CSV file; the sheet is named after the file stem.
pub fn read_csv_sheet(path: &Path) -> Result<RawSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(|cell| normalize_cell(cell).to_string()).collect());
    }
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    Ok(RawSheet::new(name, rows))
}
