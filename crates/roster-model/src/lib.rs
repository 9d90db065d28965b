//! Data model for the personnel roster filter page.
//!
//! Everything here is plain data shared by the loader, the filter engine and
//! the page builder:
//!
//! - [`Record`] / [`Dataset`]: flat string records in source order
//! - [`ChoiceSet`]: distinct year/site values, optionally partitioned by year
//! - [`FilterSelection`]: the engine's only mutable state
//! - [`Schema`]: required field names plus canonical column order

pub mod choice;
pub mod error;
pub mod payload;
pub mod record;
pub mod schema;
pub mod selection;

pub use choice::{ChoiceKind, ChoiceSet};
pub use error::{ModelError, Result};
pub use payload::PagePayload;
pub use record::{Dataset, Record};
pub use schema::{DEFAULT_COLUMNS, DEFAULT_SITE_FIELD, DEFAULT_YEAR_FIELD, Dimension, Schema};
pub use selection::FilterSelection;
