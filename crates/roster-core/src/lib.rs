//! Filter-and-render engine for the personnel roster page.
//!
//! The engine is UI-agnostic: it takes the loaded dataset, the precomputed
//! choice lists and the schema, holds the filter selection, and answers each
//! command with a [`RenderModel`]. The page builder and the CLI are both thin
//! adapters over it.
//!
//! ```ignore
//! let mut engine = FilterEngine::new(dataset, choices, schema);
//! let view = engine.select_year(["2023"])?;
//! println!("{} rows", view.count);
//! let export = engine.export_csv()?;
//! ```

pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod render;

pub use engine::FilterEngine;
pub use error::{ExportError, SelectionError};
pub use export::{CsvExport, DEFAULT_EXPORT_FILE_NAME, export_columns, export_csv, write_csv};
pub use filter::visible_records;
pub use render::{
    BADGE_SEPARATOR, Badge, BadgeLabels, ChoiceList, ChoiceOption, RenderModel, TableView,
    render_badges, render_table, table_columns,
};
