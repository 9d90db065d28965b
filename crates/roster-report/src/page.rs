//! Full page assembly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use roster_core::{DEFAULT_EXPORT_FILE_NAME, FilterEngine, RenderModel};
use roster_model::{ChoiceKind, ChoiceSet, Dataset, PagePayload, Schema};

use crate::escape::{html_escape, script_json};
use crate::fragment::{badges_html, dropdown_control_html, select_control_html, table_html};
use crate::labels::PageLabels;

const PAGE_CSS: &str = include_str!("../assets/page.css");
const PAGE_JS: &str = include_str!("../assets/page.js");

/// Format of the generation timestamp in the page header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_TITLE: &str = "人事情報 検索アプリ";
pub const DEFAULT_EMPTY_MESSAGE: &str = "該当するデータがありません。";
pub const DEFAULT_EXPORT_EMPTY_NOTICE: &str = "出力対象がありません。";
pub const DEFAULT_FOOTER: &str =
    "このページはExcelから自動生成されています。Excelを更新したら再生成してください。";

/// Everything about the page that is not data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    /// Shown in the meta line; omitted when `None`.
    pub source_name: Option<String>,
    pub generated_at: String,
    /// Year and site field names. Display columns come from the payload.
    pub schema: Schema,
    pub labels: PageLabels,
    pub empty_message: String,
    pub export_empty_notice: String,
    pub export_file_name: String,
    pub footer: Option<String>,
}

impl PageOptions {
    /// Defaults for a variant, stamped with the current local time.
    pub fn for_kind(kind: ChoiceKind) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            source_name: None,
            generated_at: format_timestamp(chrono::Local::now().naive_local()),
            schema: Schema::default(),
            labels: PageLabels::for_kind(kind),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            export_empty_notice: DEFAULT_EXPORT_EMPTY_NOTICE.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            footer: Some(DEFAULT_FOOTER.to_string()),
        }
    }

    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = format_timestamp(at);
        self
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptSchema<'a> {
    year_field: &'a str,
    site_field: &'a str,
}

/// Config object handed to the inline script.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    data: &'a Dataset,
    choices: &'a ChoiceSet,
    cols: &'a [String],
    schema: ScriptSchema<'a>,
    labels: &'a PageLabels,
    export_file_name: &'a str,
    empty_message: &'a str,
    export_empty_notice: &'a str,
}

/// Renders the self-contained HTML document for `payload`.
///
/// The unfiltered state is rendered here; the inline script takes over
/// on load.
pub fn build_page(payload: &PagePayload, options: &PageOptions) -> Result<String> {
    let schema = Schema {
        columns: payload.columns.clone(),
        ..options.schema.clone()
    };
    schema.validate().context("page schema")?;

    let engine = FilterEngine::new(payload.records.clone(), payload.choices.clone(), schema)
        .with_badge_labels(options.labels.badge_labels())
        .with_export_file_name(&options.export_file_name);
    let initial = engine.view();

    let config = ScriptConfig {
        data: &payload.records,
        choices: &payload.choices,
        cols: &payload.columns,
        schema: ScriptSchema {
            year_field: &options.schema.year_field,
            site_field: &options.schema.site_field,
        },
        labels: &options.labels,
        export_file_name: &options.export_file_name,
        empty_message: &options.empty_message,
        export_empty_notice: &options.export_empty_notice,
    };
    let config_json = script_json(&config).context("serialize page config")?;

    let html = render_document(&initial, engine.kind(), options, &config_json);
    info!(
        records = payload.records.len(),
        kind = ?engine.kind(),
        bytes = html.len(),
        "page built"
    );
    Ok(html)
}

/// Writes the page as UTF-8, creating parent directories.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "page written");
    Ok(())
}

fn render_document(
    initial: &RenderModel,
    kind: ChoiceKind,
    options: &PageOptions,
    config_json: &str,
) -> String {
    let labels = &options.labels;
    let controls = match kind {
        ChoiceKind::Cascading => [&initial.year_choices, &initial.site_choices]
            .into_iter()
            .map(|list| select_control_html(list, labels))
            .collect::<Vec<_>>(),
        ChoiceKind::Independent => [&initial.year_choices, &initial.site_choices]
            .into_iter()
            .map(|list| dropdown_control_html(list, labels))
            .collect::<Vec<_>>(),
    }
    .join("\n      ");

    format!(
        r#"<!doctype html>
<html lang="ja">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width,initial-scale=1" />
<title>{title}</title>
<style>
{css}</style>
</head>
<body>
  <header>
    <h1>{title}</h1>
    {meta}
    <div class="controls">
      {controls}
      <div class="group export">
        <button id="export" type="button" title="{export_tooltip}">{export_button}</button>
        <div class="note">{hint}</div>
      </div>
    </div>
  </header>

  <section class="card">
    <h2>{heading}</h2>
    <div class="badges" id="badges">{badges}</div>
    <div class="count" id="count">{count}</div>
    <div id="tbl">{table}</div>
  </section>
  {footer}
<script>
const CONFIG = {config_json};
{js}</script>
</body>
</html>
"#,
        title = html_escape(&options.title),
        css = PAGE_CSS,
        meta = render_meta(options),
        controls = controls,
        export_tooltip = html_escape(&labels.export_tooltip),
        export_button = html_escape(&labels.export_button),
        hint = html_escape(&labels.hint),
        heading = html_escape(&labels.heading),
        badges = badges_html(&initial.badges, labels),
        count = html_escape(&labels.count_text(initial.count)),
        table = table_html(&initial.table, &options.empty_message),
        footer = render_footer(options.footer.as_deref()),
        config_json = config_json,
        js = PAGE_JS,
    )
}

fn render_meta(options: &PageOptions) -> String {
    let labels = &options.labels;
    let mut parts = Vec::with_capacity(2);
    if let Some(source) = &options.source_name {
        parts.push(format!(
            "{}: {}",
            html_escape(&labels.source_label),
            html_escape(source)
        ));
    }
    parts.push(format!(
        "{}: {}",
        html_escape(&labels.generated_label),
        html_escape(&options.generated_at)
    ));
    format!(r#"<div class="meta">{}</div>"#, parts.join(" ／ "))
}

fn render_footer(footer: Option<&str>) -> String {
    footer
        .map(|text| format!(r#"<div class="footer">{}</div>"#, html_escape(text)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_line_includes_source_when_known() {
        let at = chrono::NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let options = PageOptions::for_kind(ChoiceKind::Cascading)
            .with_source_name("人事情報_統合.xlsx")
            .with_generated_at(at);
        assert_eq!(
            render_meta(&options),
            r#"<div class="meta">ソース: 人事情報_統合.xlsx ／ 生成日時: 2025-04-01 09:30:00</div>"#
        );
    }

    #[test]
    fn footer_is_optional() {
        assert_eq!(render_footer(None), "");
        assert_eq!(render_footer(Some("a<b")), r#"<div class="footer">a&lt;b</div>"#);
    }
}
