//! TOML configuration (`--config`).
//!
//! Every key is optional. Missing keys fall back to the workbook defaults;
//! command-line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use roster_model::{ChoiceKind, Schema};
use roster_report::{PageLabels, PageOptions};

/// Output path used when neither the file nor `--output` names one.
pub const DEFAULT_OUTPUT: &str = "index.html";

/// Page variant as named on the command line and in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single-select; choosing a year narrows the sites.
    Cascading,
    /// Multi-select checkbox dropdowns; year and site are independent.
    #[serde(alias = "independent")]
    Multi,
}

impl From<Variant> for ChoiceKind {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Cascading => ChoiceKind::Cascading,
            Variant::Multi => ChoiceKind::Independent,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub schema: SchemaConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub year_field: Option<String>,
    pub site_field: Option<String>,
    pub columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub title: Option<String>,
    pub variant: Option<Variant>,
    pub output: Option<PathBuf>,
    pub export_file_name: Option<String>,
    pub empty_message: Option<String>,
    pub export_empty_notice: Option<String>,
    /// Empty string hides the footer.
    pub footer: Option<String>,
    pub labels: LabelsConfig,
}

/// Overrides for [`PageLabels`]; unset keys keep the variant default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    pub year_label: Option<String>,
    pub site_label: Option<String>,
    pub year_placeholder: Option<String>,
    pub site_placeholder: Option<String>,
    pub year_prompt: Option<String>,
    pub site_prompt: Option<String>,
    pub select_all: Option<String>,
    pub clear_all: Option<String>,
    pub export_button: Option<String>,
    pub export_tooltip: Option<String>,
    pub hint: Option<String>,
    pub heading: Option<String>,
    pub count_suffix: Option<String>,
}

impl LabelsConfig {
    fn apply(&self, labels: &mut PageLabels) {
        let overrides = [
            (&self.year_label, &mut labels.year_label),
            (&self.site_label, &mut labels.site_label),
            (&self.year_placeholder, &mut labels.year_placeholder),
            (&self.site_placeholder, &mut labels.site_placeholder),
            (&self.year_prompt, &mut labels.year_prompt),
            (&self.site_prompt, &mut labels.site_prompt),
            (&self.select_all, &mut labels.select_all),
            (&self.clear_all, &mut labels.clear_all),
            (&self.export_button, &mut labels.export_button),
            (&self.export_tooltip, &mut labels.export_tooltip),
            (&self.hint, &mut labels.hint),
            (&self.heading, &mut labels.heading),
            (&self.count_suffix, &mut labels.count_suffix),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
    }
}

impl RosterConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Schema with configured field names and column order.
    pub fn schema(&self) -> Result<Schema> {
        let mut schema = Schema::default();
        if let Some(field) = &self.schema.year_field {
            schema.year_field.clone_from(field);
        }
        if let Some(field) = &self.schema.site_field {
            schema.site_field.clone_from(field);
        }
        if let Some(columns) = &self.schema.columns {
            schema.columns.clone_from(columns);
        }
        schema.validate().context("invalid [schema] section")?;
        Ok(schema)
    }

    /// `--variant` wins over `[page] variant`; multi-select otherwise.
    pub fn kind(&self, flag: Option<Variant>) -> ChoiceKind {
        flag.or(self.page.variant).unwrap_or(Variant::Multi).into()
    }

    /// `--output` wins over `[page] output`.
    pub fn output_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.page.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Page options for `kind`; `title` is the `--title` flag.
    pub fn page_options(&self, kind: ChoiceKind, schema: &Schema, title: Option<&str>) -> PageOptions {
        let mut options = PageOptions::for_kind(kind);
        options.schema = schema.clone();
        let page = &self.page;
        if let Some(title) = title.map(str::to_string).or_else(|| page.title.clone()) {
            options.title = title;
        }
        if let Some(name) = &page.export_file_name {
            options.export_file_name.clone_from(name);
        }
        if let Some(message) = &page.empty_message {
            options.empty_message.clone_from(message);
        }
        if let Some(notice) = &page.export_empty_notice {
            options.export_empty_notice.clone_from(notice);
        }
        if let Some(footer) = &page.footer {
            options.footer = (!footer.is_empty()).then(|| footer.clone());
        }
        page.labels.apply(&mut options.labels);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = RosterConfig::from_toml("").unwrap();
        assert_eq!(config.schema().unwrap(), Schema::default());
        assert_eq!(config.kind(None), ChoiceKind::Independent);
        assert_eq!(config.output_path(None), PathBuf::from("index.html"));
    }

    #[test]
    fn flags_override_file() {
        let config = RosterConfig::from_toml(
            r#"
            [page]
            variant = "cascading"
            output = "site/roster.html"
            title = "From file"
            "#,
        )
        .unwrap();
        assert_eq!(config.kind(None), ChoiceKind::Cascading);
        assert_eq!(config.kind(Some(Variant::Multi)), ChoiceKind::Independent);
        assert_eq!(
            config.output_path(Some(Path::new("out.html"))),
            PathBuf::from("out.html")
        );
        let schema = config.schema().unwrap();
        let options = config.page_options(ChoiceKind::Cascading, &schema, Some("From flag"));
        assert_eq!(options.title, "From flag");
        let options = config.page_options(ChoiceKind::Cascading, &schema, None);
        assert_eq!(options.title, "From file");
    }

    #[test]
    fn labels_and_messages_override_defaults() {
        let config = RosterConfig::from_toml(
            r#"
            [schema]
            year_field = "year"
            site_field = "site"
            columns = ["year", "site", "name"]

            [page]
            export_file_name = "roster.csv"
            footer = ""

            [page.labels]
            year_placeholder = "All years"
            count_suffix = " rows"
            "#,
        )
        .unwrap();
        let schema = config.schema().unwrap();
        assert_eq!(schema.columns, vec!["year", "site", "name"]);
        let options = config.page_options(ChoiceKind::Independent, &schema, None);
        assert_eq!(options.export_file_name, "roster.csv");
        assert_eq!(options.footer, None);
        assert_eq!(options.labels.year_placeholder, "All years");
        assert_eq!(options.labels.site_placeholder, "未選択");
        assert_eq!(options.labels.count_text(2), "2 rows");
        assert_eq!(options.schema.year_field, "year");
    }

    #[test]
    fn unknown_keys_and_bad_schema_are_rejected() {
        assert!(RosterConfig::from_toml("[page]\ncolour = \"red\"").is_err());
        let config = RosterConfig::from_toml("[schema]\nyear_field = \"x\"\nsite_field = \"x\"").unwrap();
        assert!(config.schema().is_err());
    }
}
