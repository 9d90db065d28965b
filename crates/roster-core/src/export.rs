//! CSV export of the visible subset.
//!
//! Export is schema-complete: the header is the union of keys over the
//! exported rows, not the canonical display order.

use std::collections::BTreeSet;
use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use roster_model::Record;

use crate::error::ExportError;

/// File name offered for the download.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "人事情報_抽出結果.csv";

/// A generated CSV file, ready to be offered for download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub columns: Vec<String>,
    /// Number of data rows (header excluded).
    pub rows: usize,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    /// UTF-8 text of the export.
    pub fn as_str(&self) -> &str {
        // Built from `&str` fields only, so the bytes are valid UTF-8.
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

/// Union of keys across `rows`, in first-seen order.
pub fn export_columns(rows: &[&Record]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut columns = Vec::new();
    for row in rows {
        for key in row.keys() {
            if seen.insert(key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// Header plus one line per row, separated by `\n`.
///
/// Fields containing a comma, quote, CR or LF are quoted; quotes are doubled.
/// The last row carries no trailing newline.
fn encode(rows: &[&Record]) -> Result<(Vec<String>, Vec<u8>), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let columns = export_columns(rows);
    let mut csv = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true)
        .from_writer(Vec::new());
    csv.write_record(&columns)?;
    for row in rows {
        csv.write_record(columns.iter().map(|column| row.value_or_empty(column)))?;
    }
    let mut bytes = csv.into_inner().map_err(|err| err.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok((columns, bytes))
}

/// Writes the export of `rows` to `writer`. Returns the header columns.
pub fn write_csv<W: Write>(rows: &[&Record], mut writer: W) -> Result<Vec<String>, ExportError> {
    let (columns, bytes) = encode(rows)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(columns)
}

/// Serializes `rows` into an in-memory export.
pub fn export_csv(rows: &[&Record], file_name: &str) -> Result<CsvExport, ExportError> {
    let (columns, bytes) = encode(rows)?;
    debug!(
        rows = rows.len(),
        columns = columns.len(),
        bytes = bytes.len(),
        "csv export generated"
    );
    Ok(CsvExport {
        file_name: file_name.to_string(),
        columns,
        rows: rows.len(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_subset_is_refused() {
        let result = export_csv(&[], DEFAULT_EXPORT_FILE_NAME);
        assert!(matches!(result, Err(ExportError::NothingToExport)));
    }

    #[test]
    fn quotes_commas_quotes_and_newlines() {
        let row = record(&[
            ("year", "2023"),
            ("site", "Tokyo"),
            ("content", "Note, \"urgent\""),
            ("memo", "line1\nline2"),
        ]);
        let export = export_csv(&[&row], "out.csv").expect("export");
        assert_eq!(
            export.as_str(),
            "year,site,content,memo\n2023,Tokyo,\"Note, \"\"urgent\"\"\",\"line1\nline2\""
        );
        assert_eq!(export.rows, 1);
        assert_eq!(export.file_name, "out.csv");
    }

    #[test]
    fn rows_are_separated_without_trailing_newline() {
        let a = record(&[("year", "2023"), ("site", "Tokyo")]);
        let b = record(&[("year", "2024"), ("site", "Osaka")]);
        let export = export_csv(&[&a, &b], "out.csv").expect("export");
        assert_eq!(export.as_str(), "year,site\n2023,Tokyo\n2024,Osaka");

        let mut written = Vec::new();
        write_csv(&[&a, &b], &mut written).expect("write");
        assert_eq!(written, export.bytes);
    }

    #[test]
    fn header_is_union_in_first_seen_order() {
        let a = record(&[("year", "2023"), ("site", "Tokyo"), ("name", "A")]);
        let b = record(&[("year", "2024"), ("site", "Osaka"), ("date", "4/1")]);
        let export = export_csv(&[&a, &b], "out.csv").expect("export");
        assert_eq!(export.columns, vec!["year", "site", "name", "date"]);
        insta::assert_snapshot!(export.as_str(), @r"
        year,site,name,date
        2023,Tokyo,A,
        2024,Osaka,,4/1
        ");
    }
}
