//! Roster ingestion.
//!
//! Turns a spreadsheet export into a [`LoadedDataset`]: the flat record list,
//! the choice lists for the requested variant, and a per-sheet report.
//! Accepted inputs are calamine workbooks, single CSV files, directories of
//! CSV files and prebuilt JSON payloads.

pub mod csv_sheet;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod payload;
pub mod sheet;
pub mod workbook;

pub use csv_sheet::read_csv_sheet;
pub use discovery::{SourceKind, detect_source, list_csv_files};
pub use error::{IngestError, Result};
pub use loader::{LoadedDataset, SheetReport, SheetStatus, load_dataset};
pub use payload::read_payload;
pub use sheet::{RawSheet, SheetOutcome, normalize_headers, sheet_records};
pub use workbook::{cell_to_string, format_number, format_serial_date, read_workbook};
