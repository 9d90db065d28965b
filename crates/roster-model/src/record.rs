#![deny(unsafe_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::schema::Schema;

/// One personnel-change entry: string fields in source column order.
///
/// Field order is kept so that exports list columns the way the source sheet
/// did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, keeping its original position when the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value, or `""` when the record does not carry the field.
    pub fn value_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Ordered records for one page session. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks the loader contract: every record has a non-blank year and site.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        for (index, record) in self.records.iter().enumerate() {
            for field in [&schema.year_field, &schema.site_field] {
                if record.value_or_empty(field).trim().is_empty() {
                    return Err(ModelError::MissingRequiredField {
                        index,
                        field: field.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("year", "2023");
        record.insert("site", "Tokyo");
        record.insert("year", "2024");

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["year", "site"]);
        assert_eq!(record.get("year"), Some("2024"));
        assert_eq!(record.value_or_empty("name"), "");
    }

    #[test]
    fn json_keeps_field_order() {
        let record: Record = [("year", "2023"), ("site", "Tokyo"), ("name", "A")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"year":"2023","site":"Tokyo","name":"A"}"#);

        let back: Record = serde_json::from_str(r#"{"z":"1","a":"2"}"#).expect("deserialize");
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn rejects_non_string_values() {
        let result = serde_json::from_str::<Record>(r#"{"year":2023}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_reports_first_blank_required_field() {
        let schema = Schema::new("year", "site", Vec::<String>::new());
        let dataset = Dataset::new(vec![
            [("year", "2023"), ("site", "Tokyo")].into_iter().collect(),
            [("year", "2023"), ("site", "  ")].into_iter().collect(),
        ]);

        assert_eq!(
            dataset.validate(&schema),
            Err(ModelError::MissingRequiredField {
                index: 1,
                field: "site".to_string(),
            })
        );
    }
}
