//! Sheet normalization shared by the workbook and CSV readers.
//!
//! A sheet arrives as a grid of already-stringified cells. The first row is
//! the header; every following row becomes one [`Record`] when both required
//! fields are present and non-blank.

use std::collections::BTreeSet;

use roster_model::{Record, Schema};

/// A sheet as read from the source, before header cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Outcome of converting one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    /// Both required columns present.
    Used {
        records: Vec<Record>,
        /// Data rows excluded for a blank year or site.
        dropped: usize,
    },
    /// At least one required column is absent; the sheet contributes nothing.
    Skipped { missing: Vec<String> },
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Trims header names, drops empty ones and suffixes duplicates with `.1`,
/// `.2`, ... Returns `(column index, name)` pairs for the kept columns.
pub fn normalize_headers(raw: &[String]) -> Vec<(usize, String)> {
    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (index, value) in raw.iter().enumerate() {
        let name = normalize_header(value);
        if name.is_empty() {
            continue;
        }
        let mut unique = name.clone();
        let mut suffix = 1;
        while seen.contains(&unique) {
            unique = format!("{name}.{suffix}");
            suffix += 1;
        }
        seen.insert(unique.clone());
        headers.push((index, unique));
    }
    headers
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|value| value.trim().is_empty())
}

/// Converts a raw sheet into records under `schema`.
pub fn sheet_records(sheet: &RawSheet, schema: &Schema) -> SheetOutcome {
    let Some((header_row, data_rows)) = sheet.rows.split_first() else {
        return SheetOutcome::Skipped {
            missing: vec![schema.year_field.clone(), schema.site_field.clone()],
        };
    };
    let headers = normalize_headers(header_row);
    let missing: Vec<String> = [&schema.year_field, &schema.site_field]
        .into_iter()
        .filter(|field| !headers.iter().any(|(_, name)| name == *field))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return SheetOutcome::Skipped { missing };
    }

    let mut records = Vec::new();
    let mut dropped = 0;
    for row in data_rows {
        if is_blank_row(row) {
            continue;
        }
        let record: Record = headers
            .iter()
            .map(|(index, name)| {
                let value = row.get(*index).map(String::as_str).unwrap_or("");
                (name.as_str(), value)
            })
            .collect();
        let has_required = [&schema.year_field, &schema.site_field]
            .into_iter()
            .all(|field| !record.value_or_empty(field).trim().is_empty());
        if has_required {
            records.push(record);
        } else {
            dropped += 1;
        }
    }
    SheetOutcome::Used { records, dropped }
}
