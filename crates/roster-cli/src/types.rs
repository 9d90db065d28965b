use std::path::PathBuf;

use roster_core::RenderModel;
use roster_ingest::SheetReport;
use roster_model::{ChoiceKind, Dimension};
use roster_report::PageLabels;

/// What `roster build` produced.
#[derive(Debug)]
pub struct BuildResult {
    pub output: PathBuf,
    pub source_name: String,
    pub kind: ChoiceKind,
    pub records: usize,
    pub sheets: Vec<SheetReport>,
    pub rows_dropped: usize,
    pub bytes: usize,
}

/// A filter value given on the command line that the data does not offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    pub dimension: Dimension,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// The visible subset was empty; no file was written.
    NothingToExport { notice: String },
}

/// What `roster query` computed.
#[derive(Debug)]
pub struct QueryResult {
    pub view: RenderModel,
    pub labels: PageLabels,
    pub empty_message: String,
    pub unknown: Vec<UnknownValue>,
    pub export: Option<ExportOutcome>,
}

impl QueryResult {
    pub fn export_refused(&self) -> bool {
        matches!(self.export, Some(ExportOutcome::NothingToExport { .. }))
    }
}
