//! Visible-subset derivation.

use roster_model::{Dataset, FilterSelection, Record, Schema};

/// Records passing `selection`, in dataset order.
///
/// Pure: the result depends only on the three arguments.
pub fn visible_records<'a>(
    dataset: &'a Dataset,
    selection: &FilterSelection,
    schema: &Schema,
) -> Vec<&'a Record> {
    if selection.is_empty() {
        return dataset.iter().collect();
    }
    dataset
        .iter()
        .filter(|record| selection.matches(record, schema))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use roster_model::ChoiceKind;

    use super::*;

    fn dataset() -> Dataset {
        [
            ("2023", "Tokyo", "A"),
            ("2023", "Osaka", "B"),
            ("2024", "Tokyo", "C"),
        ]
        .iter()
        .map(|(year, site, name)| {
            [("year", *year), ("site", *site), ("name", *name)]
                .into_iter()
                .collect::<Record>()
        })
        .collect()
    }

    fn names(rows: &[&Record]) -> Vec<String> {
        rows.iter()
            .map(|r| r.value_or_empty("name").to_string())
            .collect()
    }

    #[test]
    fn empty_dataset_yields_empty_subset() {
        let schema = Schema::new("year", "site", ["year", "site"]);
        let selection = FilterSelection::for_kind(ChoiceKind::Independent);
        assert!(visible_records(&Dataset::default(), &selection, &schema).is_empty());
    }

    #[test]
    fn filters_by_year_then_site() {
        let schema = Schema::new("year", "site", ["year", "site", "name"]);
        let data = dataset();
        let mut selection = FilterSelection::Multi {
            years: BTreeSet::from(["2023".to_string()]),
            sites: BTreeSet::new(),
        };
        assert_eq!(names(&visible_records(&data, &selection, &schema)), ["A", "B"]);

        if let FilterSelection::Multi { sites, .. } = &mut selection {
            sites.insert("Tokyo".to_string());
        }
        assert_eq!(names(&visible_records(&data, &selection, &schema)), ["A"]);
    }

    #[test]
    fn site_only_keeps_dataset_order() {
        let schema = Schema::new("year", "site", ["year", "site", "name"]);
        let data = dataset();
        let selection = FilterSelection::Single {
            year: None,
            site: Some("Tokyo".to_string()),
        };
        assert_eq!(names(&visible_records(&data, &selection, &schema)), ["A", "C"]);
    }
}
