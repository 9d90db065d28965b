//! Render model: count, badges, choice lists and the results table.
//!
//! The model is presentation-agnostic. The page builder turns it into HTML;
//! the CLI turns it into a terminal table.

use serde::Serialize;

use roster_model::{ChoiceKind, Dimension, FilterSelection, Record};

/// Separator between selected values on a badge.
pub const BADGE_SEPARATOR: &str = ", ";

/// Placeholder text shown on a badge when a dimension is unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeLabels {
    pub year_placeholder: String,
    pub site_placeholder: String,
}

impl BadgeLabels {
    pub fn new(year_placeholder: impl Into<String>, site_placeholder: impl Into<String>) -> Self {
        Self {
            year_placeholder: year_placeholder.into(),
            site_placeholder: site_placeholder.into(),
        }
    }

    /// Labels used by the personnel page for each variant.
    pub fn for_kind(kind: ChoiceKind) -> Self {
        match kind {
            ChoiceKind::Cascading => Self::new("全年度", "全事業所"),
            ChoiceKind::Independent => Self::new("未選択", "未選択"),
        }
    }

    pub fn placeholder(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Year => &self.year_placeholder,
            Dimension::Site => &self.site_placeholder,
        }
    }
}

/// Selection summary for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub dimension: Dimension,
    pub text: String,
    /// False when the badge shows the placeholder.
    pub restricted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub selected: bool,
}

/// One control per offered value of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceList {
    pub dimension: Dimension,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceList {
    pub fn new(dimension: Dimension, values: &[String], selection: &FilterSelection) -> Self {
        let options = values
            .iter()
            .map(|value| ChoiceOption {
                value: value.clone(),
                selected: selection.is_selected(dimension, value),
            })
            .collect();
        Self { dimension, options }
    }

    pub fn selected_values(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
    }
}

/// Results table, or the explicit "no matching data" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableView {
    Empty,
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty)
    }

    pub fn columns(&self) -> &[String] {
        match self {
            TableView::Empty => &[],
            TableView::Rows { columns, .. } => columns,
        }
    }
}

/// Everything a UI layer needs to draw one state of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub count: usize,
    pub badges: Vec<Badge>,
    pub year_choices: ChoiceList,
    pub site_choices: ChoiceList,
    pub table: TableView,
}

/// Canonical columns present in at least one row, in canonical order.
pub fn table_columns(rows: &[&Record], column_order: &[String]) -> Vec<String> {
    column_order
        .iter()
        .filter(|column| rows.iter().any(|row| row.contains_key(column)))
        .cloned()
        .collect()
}

/// Builds the table for the visible rows; missing fields render as `""`.
pub fn render_table(rows: &[&Record], column_order: &[String]) -> TableView {
    if rows.is_empty() {
        return TableView::Empty;
    }
    let columns = table_columns(rows, column_order);
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.value_or_empty(column).to_string())
                .collect()
        })
        .collect();
    TableView::Rows {
        columns,
        rows: body,
    }
}

pub fn render_badges(selection: &FilterSelection, labels: &BadgeLabels) -> Vec<Badge> {
    Dimension::ALL
        .iter()
        .map(|dimension| {
            let values = selection.values(*dimension);
            if values.is_empty() {
                Badge {
                    dimension: *dimension,
                    text: labels.placeholder(*dimension).to_string(),
                    restricted: false,
                }
            } else {
                Badge {
                    dimension: *dimension,
                    text: values.join(BADGE_SEPARATOR),
                    restricted: true,
                }
            }
        })
        .collect()
}
