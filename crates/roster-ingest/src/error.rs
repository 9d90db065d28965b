//! Error types for roster ingestion.

use std::path::PathBuf;
use thiserror::Error;

use roster_model::ModelError;

/// Errors that can occur while loading a roster source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("input not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not one of the supported inputs.
    #[error("unsupported input {path}: expected .xlsx, .xlsm, .xls, .xlsb, .ods, .csv, .json or a directory")]
    UnsupportedInput { path: PathBuf },

    // === Parsing Errors ===
    /// Workbook could not be opened or a sheet could not be read.
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// CSV record could not be parsed.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON payload could not be parsed.
    #[error("failed to parse payload {path}: {source}")]
    Payload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Payload records break the loader contract.
    #[error("invalid payload {path}: {source}")]
    InvalidPayload {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    // === Content Errors ===
    /// No sheet carries both required columns.
    #[error("no sheet in {path} has both '{year_field}' and '{site_field}' columns")]
    NoUsableSheet {
        path: PathBuf,
        year_field: String,
        site_field: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NoUsableSheet {
            path: PathBuf::from("/data/roster.xlsx"),
            year_field: "年度".to_string(),
            site_field: "事業所".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no sheet in /data/roster.xlsx has both '年度' and '事業所' columns"
        );
    }

    #[test]
    fn test_error_source_is_kept() {
        let err = IngestError::InvalidPayload {
            path: PathBuf::from("payload.json"),
            source: ModelError::MissingRequiredField {
                index: 3,
                field: "site".to_string(),
            },
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("record 3 is missing required field 'site'")
        );
    }
}
