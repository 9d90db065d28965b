//! Stages shared by the subcommands: load, build, select and export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use roster_core::{ExportError, FilterEngine, RenderModel};
use roster_ingest::{LoadedDataset, load_dataset};
use roster_model::{ChoiceKind, Dimension, PagePayload, Schema};
use roster_report::{PageOptions, build_page, write_page};

use crate::logging::redact_value;
use crate::types::{ExportOutcome, UnknownValue};

pub fn load_input(input: &Path, schema: &Schema, kind: ChoiceKind) -> Result<LoadedDataset> {
    load_dataset(input, schema, kind).with_context(|| format!("load {}", input.display()))
}

/// Builds the page and writes it to `output`. Returns the document size.
pub fn write_roster_page(payload: &PagePayload, options: &PageOptions, output: &Path) -> Result<usize> {
    let html = build_page(payload, options).context("build page")?;
    write_page(output, &html)?;
    Ok(html.len())
}

/// Engine over a loaded dataset, labelled like the page.
pub fn engine_for(loaded: LoadedDataset, schema: &Schema, options: &PageOptions) -> FilterEngine {
    let schema = Schema {
        columns: loaded.columns,
        ..schema.clone()
    };
    FilterEngine::new(loaded.dataset, loaded.choices, schema)
        .with_badge_labels(options.labels.badge_labels())
        .with_export_file_name(&options.export_file_name)
}

fn not_offered(offered: &[String], requested: &[String], dimension: Dimension) -> Vec<UnknownValue> {
    requested
        .iter()
        .filter(|value| !offered.contains(value))
        .map(|value| UnknownValue {
            dimension,
            value: value.clone(),
        })
        .collect()
}

/// Applies `--year` then `--site`.
///
/// Sites are checked after the year is applied, since a cascading year
/// changes which sites are offered. Values the data does not offer are
/// reported. They still constrain the multi-select variant, so they match
/// nothing; the cascading variant drops a stale site.
pub fn apply_selection(
    engine: &mut FilterEngine,
    years: &[String],
    sites: &[String],
) -> Result<(RenderModel, Vec<UnknownValue>)> {
    let mut unknown = not_offered(engine.year_options(), years, Dimension::Year);
    if !years.is_empty() {
        engine.select_year(years.iter().cloned())?;
    }
    unknown.extend(not_offered(engine.site_options(), sites, Dimension::Site));
    if !sites.is_empty() {
        engine.select_site(sites.iter().cloned())?;
    }
    for item in &unknown {
        warn!(
            dimension = %item.dimension,
            value = redact_value(&item.value),
            "filter value not present in data"
        );
    }
    Ok((engine.view(), unknown))
}

/// Writes the visible subset as CSV, or reports that there is nothing to
/// export.
pub fn export_visible(engine: &FilterEngine, path: &Path, notice: &str) -> Result<ExportOutcome> {
    match engine.export_csv() {
        Ok(export) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            fs::write(path, &export.bytes).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = export.rows, "csv exported");
            Ok(ExportOutcome::Written {
                path: path.to_path_buf(),
                rows: export.rows,
            })
        }
        Err(ExportError::NothingToExport) => {
            warn!(path = %path.display(), "nothing to export; no file written");
            Ok(ExportOutcome::NothingToExport {
                notice: notice.to_string(),
            })
        }
        Err(error) => Err(error).context("export csv"),
    }
}
