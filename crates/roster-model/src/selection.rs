use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::choice::ChoiceKind;
use crate::record::Record;
use crate::schema::{Dimension, Schema};

/// Current user-chosen filter constraints.
///
/// An empty constraint never excludes anything: `None` in single-select mode
/// and an empty set in multi-select mode both mean "all values".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FilterSelection {
    Single {
        year: Option<String>,
        site: Option<String>,
    },
    Multi {
        years: BTreeSet<String>,
        sites: BTreeSet<String>,
    },
}

impl FilterSelection {
    /// Unrestricted selection matching the choice model.
    pub fn for_kind(kind: ChoiceKind) -> Self {
        match kind {
            ChoiceKind::Cascading => FilterSelection::Single {
                year: None,
                site: None,
            },
            ChoiceKind::Independent => FilterSelection::Multi {
                years: BTreeSet::new(),
                sites: BTreeSet::new(),
            },
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, FilterSelection::Multi { .. })
    }

    /// Selected values for a dimension, in ascending order.
    pub fn values(&self, dimension: Dimension) -> Vec<&str> {
        match (self, dimension) {
            (FilterSelection::Single { year, .. }, Dimension::Year) => {
                year.as_deref().into_iter().collect()
            }
            (FilterSelection::Single { site, .. }, Dimension::Site) => {
                site.as_deref().into_iter().collect()
            }
            (FilterSelection::Multi { years, .. }, Dimension::Year) => {
                years.iter().map(String::as_str).collect()
            }
            (FilterSelection::Multi { sites, .. }, Dimension::Site) => {
                sites.iter().map(String::as_str).collect()
            }
        }
    }

    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        match (self, dimension) {
            (FilterSelection::Single { year, .. }, Dimension::Year) => year.as_deref() == Some(value),
            (FilterSelection::Single { site, .. }, Dimension::Site) => site.as_deref() == Some(value),
            (FilterSelection::Multi { years, .. }, Dimension::Year) => years.contains(value),
            (FilterSelection::Multi { sites, .. }, Dimension::Site) => sites.contains(value),
        }
    }

    pub fn is_unrestricted(&self, dimension: Dimension) -> bool {
        match (self, dimension) {
            (FilterSelection::Single { year, .. }, Dimension::Year) => year.is_none(),
            (FilterSelection::Single { site, .. }, Dimension::Site) => site.is_none(),
            (FilterSelection::Multi { years, .. }, Dimension::Year) => years.is_empty(),
            (FilterSelection::Multi { sites, .. }, Dimension::Site) => sites.is_empty(),
        }
    }

    /// True when neither dimension restricts anything.
    pub fn is_empty(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|dimension| self.is_unrestricted(*dimension))
    }

    /// Whether a dimension constraint accepts `value`.
    pub fn accepts(&self, dimension: Dimension, value: &str) -> bool {
        self.is_unrestricted(dimension) || self.is_selected(dimension, value)
    }

    /// Whether a record passes both dimension constraints.
    ///
    /// A record without the field is compared as `""`.
    pub fn matches(&self, record: &Record, schema: &Schema) -> bool {
        Dimension::ALL.iter().all(|dimension| {
            self.accepts(*dimension, record.value_or_empty(schema.field(*dimension)))
        })
    }
}
