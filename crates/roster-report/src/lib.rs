//! HTML page generation for the roster filter.
//!
//! [`build_page`] turns a [`roster_model::PagePayload`] into one
//! self-contained document: inline CSS, the filter controls for the payload's
//! variant, the server-rendered unfiltered state and an inline script that
//! re-renders on every change. Nothing is fetched at runtime.

mod escape;
mod fragment;
mod labels;
mod page;

pub use escape::{html_escape, script_json};
pub use fragment::{badges_html, checkbox_list_html, select_options_html, table_html};
pub use labels::PageLabels;
pub use page::{
    DEFAULT_EMPTY_MESSAGE, DEFAULT_EXPORT_EMPTY_NOTICE, DEFAULT_FOOTER, DEFAULT_TITLE,
    PageOptions, TIMESTAMP_FORMAT, build_page, format_timestamp, write_page,
};
