//! Workbook reading through calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::sheet::RawSheet;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reads every worksheet in workbook order, stringifying each cell.
pub fn read_workbook(path: &Path) -> Result<Vec<RawSheet>> {
    let workbook_error = |source: calamine::Error| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(workbook_error)?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        debug!(sheet = %sheet_name, rows = rows.len(), "worksheet read");
        sheets.push(RawSheet::new(sheet_name, rows));
    }
    Ok(sheets)
}

/// Text form of a cell as it appears in records.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            value.clone()
        }
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_number(*value),
        Data::DateTime(value) => {
            let serial = value.as_f64();
            if value.is_duration() {
                format_number(serial)
            } else {
                format_serial_date(serial).unwrap_or_else(|| format_number(serial))
            }
        }
    }
}

/// Integral values print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Formats an Excel serial date (1900 system) as `YYYY-MM-DD`, adding
/// ` HH:MM:SS` when the time part is not midnight.
pub fn format_serial_date(serial: f64) -> Option<String> {
    let date_time = serial_to_datetime(serial)?;
    if date_time.time() == chrono::NaiveTime::MIN {
        Some(date_time.format("%Y-%m-%d").to_string())
    } else {
        Some(date_time.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    base.checked_add_signed(Duration::try_seconds(seconds)?)
}
