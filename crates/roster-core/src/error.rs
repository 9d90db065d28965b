//! Error types for the filter engine.

use roster_model::Dimension;
use thiserror::Error;

/// Errors raised while exporting the visible subset.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No visible rows; no file is produced.
    #[error("nothing to export")]
    NothingToExport,

    #[error("failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by selection commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A single-select dimension was given more than one value.
    #[error("{dimension} accepts a single value in cascading mode, got {count}")]
    SingleValueExpected { dimension: Dimension, count: usize },
}
