//! Property tests for subset derivation, table columns, cascading choices and
//! CSV export.

use std::collections::BTreeSet;

use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;
use proptest::sample::select;

use roster_core::{FilterEngine, TableView, export_csv, table_columns, visible_records};
use roster_model::{ChoiceKind, ChoiceSet, Dataset, Dimension, FilterSelection, Record, Schema};

const YEARS: [&str; 3] = ["2022", "2023", "2024"];
const SITES: [&str; 3] = ["Nagoya", "Osaka", "Tokyo"];
const EXTRA_KEYS: [&str; 4] = ["name", "date", "content", "memo"];

fn schema() -> Schema {
    Schema::new("year", "site", ["year", "site", "role", "name", "date", "content"])
}

fn field_value() -> impl Strategy<Value = String> {
    prop_oneof!["[a-zA-Z0-9 ]{0,8}", "[a-z,\"\r\n ]{0,8}", "[あ-ん]{0,4}",]
}

fn record() -> impl Strategy<Value = Record> {
    (
        select(YEARS.to_vec()),
        select(SITES.to_vec()),
        btree_map(select(EXTRA_KEYS.to_vec()), field_value(), 0..4),
    )
        .prop_map(|(year, site, extras)| {
            let mut record = Record::new();
            record.insert("year", year);
            record.insert("site", site);
            for (key, value) in extras {
                record.insert(key, value);
            }
            record
        })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    vec(record(), 0..24).prop_map(Dataset::new)
}

fn multi_selection() -> impl Strategy<Value = FilterSelection> {
    (
        btree_set(select(YEARS.to_vec()), 0..3),
        btree_set(select(SITES.to_vec()), 0..3),
    )
        .prop_map(|(years, sites)| FilterSelection::Multi {
            years: years.into_iter().map(str::to_string).collect(),
            sites: sites.into_iter().map(str::to_string).collect(),
        })
}

fn brute_force<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    let years: BTreeSet<&str> = selection.values(Dimension::Year).into_iter().collect();
    let sites: BTreeSet<&str> = selection.values(Dimension::Site).into_iter().collect();
    dataset
        .iter()
        .filter(|r| years.is_empty() || years.contains(r.value_or_empty("year")))
        .filter(|r| sites.is_empty() || sites.contains(r.value_or_empty("site")))
        .collect()
}

proptest! {
    #[test]
    fn filter_is_pure_and_order_preserving(data in dataset(), selection in multi_selection()) {
        let schema = schema();
        let first = visible_records(&data, &selection, &schema);
        let second = visible_records(&data, &selection, &schema);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, brute_force(&data, &selection));
    }

    #[test]
    fn no_restriction_returns_dataset(data in dataset()) {
        let schema = schema();
        for kind in [ChoiceKind::Cascading, ChoiceKind::Independent] {
            let selection = FilterSelection::for_kind(kind);
            let visible = visible_records(&data, &selection, &schema);
            let all: Vec<&Record> = data.iter().collect();
            prop_assert_eq!(visible, all);
        }
    }

    #[test]
    fn table_columns_follow_canonical_order(data in dataset(), selection in multi_selection()) {
        let schema = schema();
        let rows = visible_records(&data, &selection, &schema);
        let columns = table_columns(&rows, &schema.columns);
        for column in &columns {
            prop_assert!(rows.iter().any(|r| r.contains_key(column)));
        }
        let positions: Vec<usize> = columns
            .iter()
            .filter_map(|c| schema.columns.iter().position(|s| s == c))
            .collect();
        prop_assert_eq!(positions.len(), columns.len());
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(!columns.iter().any(|c| c == "role"));
    }

    #[test]
    fn export_round_trips_every_field(data in dataset(), selection in multi_selection()) {
        let schema = schema();
        let rows = visible_records(&data, &selection, &schema);
        prop_assume!(!rows.is_empty());

        let export = export_csv(&rows, "out.csv").expect("export");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(export.bytes.as_slice());
        let header: Vec<String> = reader
            .headers()
            .expect("header")
            .iter()
            .map(str::to_string)
            .collect();

        let union: BTreeSet<&str> = rows.iter().flat_map(|r| r.keys()).collect();
        let header_set: BTreeSet<&str> = header.iter().map(String::as_str).collect();
        prop_assert_eq!(header.len(), header_set.len());
        prop_assert_eq!(header_set, union);

        let parsed: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("parse rows");
        prop_assert_eq!(parsed.len(), rows.len());
        for (row, record) in rows.iter().zip(&parsed) {
            for (index, column) in header.iter().enumerate() {
                prop_assert_eq!(record.get(index).unwrap_or(""), row.value_or_empty(column));
            }
        }
    }

    #[test]
    fn cascading_sites_co_occur_with_year(data in dataset(), year_index in 0usize..3) {
        let schema = schema();
        let choices = ChoiceSet::build(&data, &schema, ChoiceKind::Cascading);
        prop_assume!(!choices.years().is_empty());
        let year = choices.years()[year_index % choices.years().len()].clone();

        let mut engine = FilterEngine::new(data.clone(), choices, schema);
        engine.select_year([year.as_str()]).expect("select year");
        for site in engine.site_options() {
            let co_occurs = data
                .iter()
                .any(|r| r.value_or_empty("year") == year && r.value_or_empty("site") == site);
            prop_assert!(co_occurs, "site {} never occurs with year {}", site, year);
        }

        if let Some(site) = engine.site_options().first().cloned() {
            engine.select_site([site]).expect("select site");
            prop_assert!(!engine.selection().is_unrestricted(Dimension::Site));
            let other = engine
                .year_options()
                .iter()
                .find(|y| **y != year)
                .cloned();
            if let Some(other) = other {
                engine.select_year([other]).expect("change year");
                prop_assert!(engine.selection().is_unrestricted(Dimension::Site));
            }
        }
    }

    #[test]
    fn independent_engine_matches_brute_force(
        data in dataset(),
        years in btree_set(select(vec!["1999", "2022", "2023", "2024"]), 0..3),
        sites in btree_set(select(vec!["Kyoto", "Nagoya", "Osaka", "Tokyo"]), 0..3),
    ) {
        let schema = schema();
        let choices = ChoiceSet::build(&data, &schema, ChoiceKind::Independent);
        let mut engine = FilterEngine::new(data.clone(), choices, schema);
        engine.select_year(years.iter().copied()).expect("select years");
        engine.select_site(sites.iter().copied()).expect("select sites");

        let selection = FilterSelection::Multi {
            years: years.into_iter().map(str::to_string).collect(),
            sites: sites.into_iter().map(str::to_string).collect(),
        };
        prop_assert_eq!(engine.selection(), &selection);
        prop_assert_eq!(engine.visible(), brute_force(&data, &selection));
    }

    #[test]
    fn empty_view_never_renders_a_table(data in dataset(), selection in multi_selection()) {
        let schema = schema();
        let choices = ChoiceSet::build(&data, &schema, ChoiceKind::Independent);
        let mut engine = FilterEngine::new(data, choices, schema);
        let years: Vec<String> = selection.values(Dimension::Year).into_iter().map(str::to_string).collect();
        let sites: Vec<String> = selection.values(Dimension::Site).into_iter().map(str::to_string).collect();
        engine.select_year(years).expect("select years");
        let view = engine.select_site(sites).expect("select sites");
        prop_assert_eq!(view.count == 0, matches!(view.table, TableView::Empty));
        prop_assert_eq!(view.count == 0, engine.export_csv().is_err());
    }
}
