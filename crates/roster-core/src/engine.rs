//! Command interface over a loaded dataset.
//!
//! [`FilterEngine`] owns the [`FilterSelection`] and is the only thing that
//! writes it. UI layers translate their input events into the commands below
//! and draw the returned [`RenderModel`].

use std::collections::BTreeSet;

use tracing::debug;

use roster_model::{ChoiceKind, ChoiceSet, Dataset, Dimension, FilterSelection, Record, Schema};

use crate::error::{ExportError, SelectionError};
use crate::export::{CsvExport, DEFAULT_EXPORT_FILE_NAME, export_csv};
use crate::filter::visible_records;
use crate::render::{BadgeLabels, ChoiceList, RenderModel, render_badges, render_table};

#[derive(Debug, Clone)]
pub struct FilterEngine {
    dataset: Dataset,
    choices: ChoiceSet,
    schema: Schema,
    selection: FilterSelection,
    /// Sites currently offered. Fixed for independent choices, rebuilt on
    /// every year change for cascading ones.
    site_options: Vec<String>,
    badge_labels: BadgeLabels,
    export_file_name: String,
}

impl FilterEngine {
    pub fn new(dataset: Dataset, choices: ChoiceSet, schema: Schema) -> Self {
        let kind = choices.kind();
        let selection = FilterSelection::for_kind(kind);
        let site_options = choices.sites_for(None).to_vec();
        debug!(
            records = dataset.len(),
            years = choices.years().len(),
            kind = ?kind,
            "filter engine initialized"
        );
        Self {
            dataset,
            choices,
            schema,
            selection,
            site_options,
            badge_labels: BadgeLabels::for_kind(kind),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_badge_labels(mut self, labels: BadgeLabels) -> Self {
        self.badge_labels = labels;
        self
    }

    #[must_use]
    pub fn with_export_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.export_file_name = file_name.into();
        self
    }

    pub fn kind(&self) -> ChoiceKind {
        self.choices.kind()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn choices(&self) -> &ChoiceSet {
        &self.choices
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn year_options(&self) -> &[String] {
        self.choices.years()
    }

    pub fn site_options(&self) -> &[String] {
        &self.site_options
    }

    pub fn options(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Year => self.year_options(),
            Dimension::Site => self.site_options(),
        }
    }

    /// Records matching the current selection, in dataset order.
    pub fn visible(&self) -> Vec<&Record> {
        visible_records(&self.dataset, &self.selection, &self.schema)
    }

    /// Render model for the current state.
    pub fn view(&self) -> RenderModel {
        let rows = self.visible();
        debug!(
            visible = rows.len(),
            total = self.dataset.len(),
            "visible subset recomputed"
        );
        RenderModel {
            count: rows.len(),
            badges: render_badges(&self.selection, &self.badge_labels),
            year_choices: ChoiceList::new(Dimension::Year, self.year_options(), &self.selection),
            site_choices: ChoiceList::new(Dimension::Site, &self.site_options, &self.selection),
            table: render_table(&rows, &self.schema.columns),
        }
    }

    /// Replaces the year selection.
    ///
    /// An empty iterator clears the dimension. A year no record carries is
    /// still a constraint and yields an empty subset. Cascading choices accept
    /// at most one value and drop the site selection whenever the year changes.
    pub fn select_year<I, S>(&mut self, values: I) -> Result<RenderModel, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = self.admissible(Dimension::Year, values);
        self.apply(Dimension::Year, values)?;
        Ok(self.view())
    }

    /// Replaces the site selection.
    ///
    /// In the cascading variant a site not offered for the selected year is
    /// stale and dropped.
    pub fn select_site<I, S>(&mut self, values: I) -> Result<RenderModel, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = self.admissible(Dimension::Site, values);
        self.apply(Dimension::Site, values)?;
        Ok(self.view())
    }

    /// Flips one option, like clicking its checkbox.
    ///
    /// For single-select dimensions this selects the value, or clears the
    /// dimension when the value was already selected.
    pub fn toggle_year(&mut self, value: &str) -> RenderModel {
        self.toggle(Dimension::Year, value);
        self.view()
    }

    pub fn toggle_site(&mut self, value: &str) -> RenderModel {
        self.toggle(Dimension::Site, value);
        self.view()
    }

    /// Selects every offered year.
    pub fn select_all_years(&mut self) -> Result<RenderModel, SelectionError> {
        let values = self.year_options().to_vec();
        self.apply(Dimension::Year, values)?;
        Ok(self.view())
    }

    /// Selects every offered site.
    pub fn select_all_sites(&mut self) -> Result<RenderModel, SelectionError> {
        let values = self.site_options.clone();
        self.apply(Dimension::Site, values)?;
        Ok(self.view())
    }

    pub fn clear_year(&mut self) -> RenderModel {
        self.set_single_or_multi(Dimension::Year, Vec::new());
        self.view()
    }

    pub fn clear_site(&mut self) -> RenderModel {
        self.set_single_or_multi(Dimension::Site, Vec::new());
        self.view()
    }

    /// Exports the visible subset as CSV.
    pub fn export_csv(&self) -> Result<CsvExport, ExportError> {
        let rows = self.visible();
        export_csv(&rows, &self.export_file_name)
    }

    /// Cascading sites must come from the list offered for the selected
    /// year.
    fn drops_stale(&self, dimension: Dimension) -> bool {
        dimension == Dimension::Site && self.kind() == ChoiceKind::Cascading
    }

    /// Deduplicates `values` in input order, dropping stale cascading sites.
    fn admissible<I, S>(&self, dimension: Dimension, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let drops_stale = self.drops_stale(dimension);
        let mut seen = BTreeSet::new();
        let mut kept = Vec::new();
        for value in values {
            let value = value.into();
            if drops_stale && !self.site_options.contains(&value) {
                debug!(%dimension, "dropping stale value");
                continue;
            }
            if seen.insert(value.clone()) {
                kept.push(value);
            }
        }
        kept
    }

    fn apply(&mut self, dimension: Dimension, values: Vec<String>) -> Result<(), SelectionError> {
        if !self.selection.is_multi() && values.len() > 1 {
            return Err(SelectionError::SingleValueExpected {
                dimension,
                count: values.len(),
            });
        }
        self.set_single_or_multi(dimension, values);
        Ok(())
    }

    fn toggle(&mut self, dimension: Dimension, value: &str) {
        if self.drops_stale(dimension) && !self.site_options.iter().any(|site| site == value) {
            debug!(%dimension, "ignoring toggle of a stale value");
            return;
        }
        let mut values: Vec<String> = self
            .selection
            .values(dimension)
            .into_iter()
            .map(str::to_string)
            .collect();
        if let Some(index) = values.iter().position(|selected| selected == value) {
            values.remove(index);
        } else if self.selection.is_multi() {
            values.push(value.to_string());
        } else {
            values = vec![value.to_string()];
        }
        self.set_single_or_multi(dimension, values);
    }

    /// Writes the selection; `values` is already validated for the mode.
    fn set_single_or_multi(&mut self, dimension: Dimension, values: Vec<String>) {
        let year_changed = match (&mut self.selection, dimension) {
            (FilterSelection::Single { year, .. }, Dimension::Year) => {
                let next = values.into_iter().next();
                let changed = *year != next;
                *year = next;
                changed
            }
            (FilterSelection::Single { site, .. }, Dimension::Site) => {
                *site = values.into_iter().next();
                false
            }
            (FilterSelection::Multi { years, .. }, Dimension::Year) => {
                *years = values.into_iter().collect();
                false
            }
            (FilterSelection::Multi { sites, .. }, Dimension::Site) => {
                *sites = values.into_iter().collect();
                false
            }
        };
        if year_changed {
            self.refresh_site_options();
        }
    }

    /// Rebuilds the cascading site list for the selected year and clears the
    /// site selection, which may no longer be valid.
    fn refresh_site_options(&mut self) {
        let year = self
            .selection
            .values(Dimension::Year)
            .first()
            .map(|y| (*y).to_string());
        self.site_options = self.choices.sites_for(year.as_deref()).to_vec();
        if let FilterSelection::Single { site, .. } = &mut self.selection
            && site.take().is_some()
        {
            debug!("site selection cleared after year change");
        }
    }
}
