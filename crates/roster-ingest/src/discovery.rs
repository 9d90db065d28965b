//! Input discovery: what kind of source a path is, and which CSV files a
//! directory holds.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Source formats accepted by [`crate::load_dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Spreadsheet read through calamine (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
    Workbook,
    /// Single CSV file, one sheet.
    Csv,
    /// Directory of CSV files, one sheet per file.
    CsvDirectory,
    /// Prebuilt page payload.
    Payload,
}

/// Classifies `path` by existence and extension (case-insensitive).
pub fn detect_source(path: &Path) -> Result<SourceKind> {
    if path.is_dir() {
        return Ok(SourceKind::CsvDirectory);
    }
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceKind::Workbook),
        "csv" => Ok(SourceKind::Csv),
        "json" => Ok(SourceKind::Payload),
        _ => Err(IngestError::UnsupportedInput {
            path: path.to_path_buf(),
        }),
    }
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
