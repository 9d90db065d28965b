use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::record::Dataset;
use crate::schema::Schema;

/// How the two dimensions relate on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    /// Single-select; the year narrows the offered sites.
    Cascading,
    /// Multi-select; year and site filter independently.
    #[default]
    Independent,
}

/// Precomputed distinct filter values, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceSet {
    Cascading {
        year: Vec<String>,
        #[serde(rename = "siteByYear")]
        site_by_year: BTreeMap<String, Vec<String>>,
    },
    Independent {
        year: Vec<String>,
        site: Vec<String>,
    },
}

impl ChoiceSet {
    /// Collects distinct non-blank year and site values from the dataset.
    pub fn build(dataset: &Dataset, schema: &Schema, kind: ChoiceKind) -> Self {
        let mut years = BTreeSet::new();
        let mut sites = BTreeSet::new();
        let mut by_year: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for record in dataset {
            let year = record.value_or_empty(&schema.year_field);
            let site = record.value_or_empty(&schema.site_field);
            let has_year = !year.trim().is_empty();
            let has_site = !site.trim().is_empty();
            if has_year {
                years.insert(year);
            }
            if has_site {
                sites.insert(site);
            }
            if has_year && has_site {
                by_year.entry(year).or_default().insert(site);
            }
        }
        let year: Vec<String> = years.into_iter().map(str::to_string).collect();
        match kind {
            ChoiceKind::Independent => ChoiceSet::Independent {
                year,
                site: sites.into_iter().map(str::to_string).collect(),
            },
            ChoiceKind::Cascading => {
                let site_by_year: BTreeMap<String, Vec<String>> = year
                    .iter()
                    .map(|y| {
                        let sites = by_year
                            .get(y.as_str())
                            .map(|set| set.iter().map(|s| (*s).to_string()).collect::<Vec<_>>())
                            .unwrap_or_default();
                        (y.clone(), sites)
                    })
                    .collect();
                ChoiceSet::Cascading { year, site_by_year }
            }
        }
    }

    pub fn kind(&self) -> ChoiceKind {
        match self {
            ChoiceSet::Cascading { .. } => ChoiceKind::Cascading,
            ChoiceSet::Independent { .. } => ChoiceKind::Independent,
        }
    }

    pub fn years(&self) -> &[String] {
        match self {
            ChoiceSet::Cascading { year, .. } | ChoiceSet::Independent { year, .. } => year,
        }
    }

    /// Sites offered once `year` is chosen.
    ///
    /// Independent sets ignore the year. Cascading sets offer nothing until a
    /// known year is selected.
    pub fn sites_for(&self, year: Option<&str>) -> &[String] {
        match self {
            ChoiceSet::Independent { site, .. } => site,
            ChoiceSet::Cascading { site_by_year, .. } => year
                .and_then(|y| site_by_year.get(y))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Every site across all years, sorted and deduplicated.
    pub fn all_sites(&self) -> Vec<String> {
        match self {
            ChoiceSet::Independent { site, .. } => site.clone(),
            ChoiceSet::Cascading { site_by_year, .. } => site_by_year
                .values()
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }
}
