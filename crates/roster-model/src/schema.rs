use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default year column of the personnel workbook.
pub const DEFAULT_YEAR_FIELD: &str = "年度";
/// Default site column of the personnel workbook.
pub const DEFAULT_SITE_FIELD: &str = "事業所";
/// Canonical display order; absent columns are skipped at render time.
pub const DEFAULT_COLUMNS: [&str; 6] = ["年度", "事業所", "辞令", "氏名", "日付", "内容"];

/// A filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Year,
    Site,
}

impl Dimension {
    pub const ALL: [Dimension; 2] = [Dimension::Year, Dimension::Site];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Year => "year",
            Dimension::Site => "site",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the two required fields plus the canonical column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub year_field: String,
    pub site_field: String,
    pub columns: Vec<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            year_field: DEFAULT_YEAR_FIELD.to_string(),
            site_field: DEFAULT_SITE_FIELD.to_string(),
            columns: DEFAULT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl Schema {
    pub fn new<I, S>(year_field: impl Into<String>, site_field: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year_field: year_field.into(),
            site_field: site_field.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Field name backing a dimension.
    pub fn field(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Year => &self.year_field,
            Dimension::Site => &self.site_field,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.year_field.trim().is_empty() || self.site_field.trim().is_empty() {
            return Err(ModelError::InvalidSchema(
                "year and site field names must not be empty".to_string(),
            ));
        }
        if self.year_field == self.site_field {
            return Err(ModelError::InvalidSchema(format!(
                "year and site must be different fields (both '{}')",
                self.year_field
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_matches_workbook_columns() {
        let schema = Schema::default();
        assert_eq!(schema.field(Dimension::Year), "年度");
        assert_eq!(schema.field(Dimension::Site), "事業所");
        assert_eq!(schema.columns.len(), 6);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn same_field_for_both_dimensions_is_rejected() {
        let schema = Schema::new("year", "year", ["year"]);
        assert!(matches!(schema.validate(), Err(ModelError::InvalidSchema(_))));
    }
}
