//! Loader tests over real files in a temporary directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use roster_ingest::{IngestError, SheetStatus, load_dataset};
use roster_model::{ChoiceKind, ChoiceSet, Schema};

const SHEET_2023: &str = "\
年度,事業所,辞令,氏名,日付,内容
2023,東京,異動,山田,2023-04-01,\"本社, 営業部\"
2023,大阪,昇格,佐藤,2023-04-01,課長
2023,,退職,鈴木,2023-06-30,
";

const SHEET_2024: &str = "\
\u{feff}年度,事業所,氏名,備考
2024,東京,高橋,
2024,名古屋,伊藤,兼務
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn loads_single_csv() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "roster.csv", SHEET_2023);

    let loaded = load_dataset(
        &dir.path().join("roster.csv"),
        &Schema::default(),
        ChoiceKind::Independent,
    )
    .unwrap();

    assert_eq!(loaded.dataset.len(), 2);
    assert_eq!(loaded.rows_dropped(), 1);
    assert_eq!(loaded.sheets_used(), 1);
    assert_eq!(loaded.source_name(), "roster.csv");
    let first = &loaded.dataset.records()[0];
    assert_eq!(first.get("内容"), Some("本社, 営業部"));
    assert_eq!(
        loaded.choices,
        ChoiceSet::Independent {
            year: vec!["2023".to_string()],
            site: vec!["大阪".to_string(), "東京".to_string()],
        }
    );
}

#[test]
fn directory_sheets_load_in_filename_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b_2024.csv", SHEET_2024);
    write(dir.path(), "a_2023.csv", SHEET_2023);
    write(dir.path(), "c_memo.csv", "メモ,備考\nx,y\n");
    write(dir.path(), "readme.txt", "ignored");

    let loaded = load_dataset(dir.path(), &Schema::default(), ChoiceKind::Cascading).unwrap();

    let names: Vec<&str> = loaded.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a_2023", "b_2024", "c_memo"]);
    assert_eq!(loaded.sheets_used(), 2);
    assert_eq!(loaded.sheets_skipped(), 1);
    assert_eq!(
        loaded.sheets[2].status,
        SheetStatus::Skipped {
            missing: vec!["年度".to_string(), "事業所".to_string()]
        }
    );

    let years: Vec<&str> = loaded
        .dataset
        .iter()
        .map(|r| r.value_or_empty("年度"))
        .collect();
    assert_eq!(years, vec!["2023", "2023", "2024", "2024"]);
    // Records keep every column of their own sheet.
    assert!(loaded.dataset.records()[2].contains_key("備考"));
    assert!(!loaded.dataset.records()[0].contains_key("備考"));

    assert_eq!(loaded.choices.sites_for(Some("2024")), ["名古屋", "東京"]);
    assert_eq!(loaded.choices.sites_for(Some("2023")), ["大阪", "東京"]);
}

#[test]
fn no_usable_sheet_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "memo.csv", "メモ,備考\nx,y\n");

    let result = load_dataset(
        &dir.path().join("memo.csv"),
        &Schema::default(),
        ChoiceKind::Independent,
    );
    assert!(matches!(result, Err(IngestError::NoUsableSheet { .. })));
}

#[test]
fn custom_schema_fields_are_honored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "en.csv", "year,site,name\n2023,Tokyo,A\n2023,Osaka,B\n");
    let schema = Schema::new("year", "site", ["year", "site", "name"]);

    let loaded = load_dataset(&dir.path().join("en.csv"), &schema, ChoiceKind::Independent)
        .unwrap();
    assert_eq!(loaded.dataset.len(), 2);
    assert_eq!(loaded.columns, vec!["year", "site", "name"]);
}

#[test]
fn payload_round_trips_and_rebuilds_choices_for_other_variant() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "roster.csv", SHEET_2023);
    let loaded = load_dataset(
        &dir.path().join("roster.csv"),
        &Schema::default(),
        ChoiceKind::Independent,
    )
    .unwrap();
    let expected_records = loaded.dataset.clone();
    let json = serde_json::to_string(&loaded.into_payload()).unwrap();
    write(dir.path(), "payload.json", &json);

    let same = load_dataset(
        &dir.path().join("payload.json"),
        &Schema::default(),
        ChoiceKind::Independent,
    )
    .unwrap();
    assert_eq!(same.dataset, expected_records);
    assert!(same.sheets.is_empty());
    assert_eq!(same.choices.kind(), ChoiceKind::Independent);

    let cascading = load_dataset(
        &dir.path().join("payload.json"),
        &Schema::default(),
        ChoiceKind::Cascading,
    )
    .unwrap();
    assert_eq!(cascading.choices.kind(), ChoiceKind::Cascading);
    assert_eq!(cascading.choices.sites_for(Some("2023")), ["大阪", "東京"]);
}

#[test]
fn invalid_payload_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "bad.json",
        r#"{"records":[{"年度":"2023","事業所":""}],"choices":{"year":["2023"],"site":[]},"columns":[]}"#,
    );
    let result = load_dataset(
        &dir.path().join("bad.json"),
        &Schema::default(),
        ChoiceKind::Independent,
    );
    assert!(matches!(result, Err(IngestError::InvalidPayload { .. })));

    write(dir.path(), "broken.json", "{not json");
    let result = load_dataset(
        &dir.path().join("broken.json"),
        &Schema::default(),
        ChoiceKind::Independent,
    );
    assert!(matches!(result, Err(IngestError::Payload { .. })));
}
