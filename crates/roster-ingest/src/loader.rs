//! Dataset loading: source detection, sheet conversion and choice building.

use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span};

use roster_model::{ChoiceKind, ChoiceSet, Dataset, PagePayload, Record, Schema};

use crate::csv_sheet::read_csv_sheet;
use crate::discovery::{SourceKind, detect_source, list_csv_files};
use crate::error::{IngestError, Result};
use crate::payload::read_payload;
use crate::sheet::{RawSheet, SheetOutcome, sheet_records};
use crate::workbook::read_workbook;

/// Per-sheet load summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub name: String,
    pub status: SheetStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetStatus {
    Used { records: usize, dropped: usize },
    Skipped { missing: Vec<String> },
}

impl SheetReport {
    pub fn is_used(&self) -> bool {
        matches!(self.status, SheetStatus::Used { .. })
    }

    pub fn records(&self) -> usize {
        match self.status {
            SheetStatus::Used { records, .. } => records,
            SheetStatus::Skipped { .. } => 0,
        }
    }

    pub fn dropped(&self) -> usize {
        match self.status {
            SheetStatus::Used { dropped, .. } => dropped,
            SheetStatus::Skipped { .. } => 0,
        }
    }
}

/// A loaded roster plus what the loader did to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDataset {
    pub source: PathBuf,
    pub dataset: Dataset,
    pub choices: ChoiceSet,
    /// Canonical display order.
    pub columns: Vec<String>,
    /// Empty when the source was a prebuilt payload.
    pub sheets: Vec<SheetReport>,
}

impl LoadedDataset {
    pub fn sheets_used(&self) -> usize {
        self.sheets.iter().filter(|sheet| sheet.is_used()).count()
    }

    pub fn sheets_skipped(&self) -> usize {
        self.sheets.len() - self.sheets_used()
    }

    pub fn rows_dropped(&self) -> usize {
        self.sheets.iter().map(SheetReport::dropped).sum()
    }

    /// Source file name for display, without the directory.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    pub fn into_payload(self) -> PagePayload {
        PagePayload::new(self.dataset, self.choices, self.columns)
    }
}

/// Loads a workbook, CSV file, CSV directory or JSON payload.
///
/// Sheets lacking a required column are skipped. Fails when no sheet could be
/// used at all.
pub fn load_dataset(path: &Path, schema: &Schema, kind: ChoiceKind) -> Result<LoadedDataset> {
    let span = info_span!("load_dataset", path = %path.display(), ?kind);
    let _guard = span.enter();

    let raw_sheets = match detect_source(path)? {
        SourceKind::Payload => return load_payload(path, schema, kind),
        SourceKind::Workbook => read_workbook(path)?,
        SourceKind::Csv => vec![read_csv_sheet(path)?],
        SourceKind::CsvDirectory => {
            let files = list_csv_files(path)?;
            debug!(files = files.len(), "csv files discovered");
            files
                .iter()
                .map(|file| read_csv_sheet(file))
                .collect::<Result<Vec<_>>>()?
        }
    };

    let (records, sheets) = collect_sheets(&raw_sheets, schema);
    if !sheets.iter().any(SheetReport::is_used) {
        return Err(IngestError::NoUsableSheet {
            path: path.to_path_buf(),
            year_field: schema.year_field.clone(),
            site_field: schema.site_field.clone(),
        });
    }

    let dataset = Dataset::new(records);
    let choices = ChoiceSet::build(&dataset, schema, kind);
    let loaded = LoadedDataset {
        source: path.to_path_buf(),
        dataset,
        choices,
        columns: schema.columns.clone(),
        sheets,
    };
    info!(
        records = loaded.dataset.len(),
        sheets_used = loaded.sheets_used(),
        sheets_skipped = loaded.sheets_skipped(),
        rows_dropped = loaded.rows_dropped(),
        years = loaded.choices.years().len(),
        "dataset loaded"
    );
    Ok(loaded)
}

fn collect_sheets(raw_sheets: &[RawSheet], schema: &Schema) -> (Vec<Record>, Vec<SheetReport>) {
    let mut records = Vec::new();
    let mut reports = Vec::with_capacity(raw_sheets.len());
    for sheet in raw_sheets {
        let status = match sheet_records(sheet, schema) {
            SheetOutcome::Used {
                records: sheet_rows,
                dropped,
            } => {
                debug!(sheet = %sheet.name, records = sheet_rows.len(), dropped, "sheet used");
                let status = SheetStatus::Used {
                    records: sheet_rows.len(),
                    dropped,
                };
                records.extend(sheet_rows);
                status
            }
            SheetOutcome::Skipped { missing } => {
                info!(sheet = %sheet.name, missing = ?missing, "sheet skipped: required column absent");
                SheetStatus::Skipped { missing }
            }
        };
        reports.push(SheetReport {
            name: sheet.name.clone(),
            status,
        });
    }
    (records, reports)
}

fn load_payload(path: &Path, schema: &Schema, kind: ChoiceKind) -> Result<LoadedDataset> {
    let payload = read_payload(path, schema)?;
    let choices = if payload.choices.kind() == kind {
        payload.choices
    } else {
        info!(
            stored = ?payload.choices.kind(),
            requested = ?kind,
            "payload choices rebuilt for requested variant"
        );
        ChoiceSet::build(&payload.records, schema, kind)
    };
    let loaded = LoadedDataset {
        source: path.to_path_buf(),
        dataset: payload.records,
        choices,
        columns: payload.columns,
        sheets: Vec::new(),
    };
    info!(records = loaded.dataset.len(), "payload loaded");
    Ok(loaded)
}
