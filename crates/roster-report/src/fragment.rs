//! HTML fragments for one render state.
//!
//! The same markup is produced by the inline script after each change, so the
//! server-rendered page and the interactive page look identical.

use roster_core::{Badge, ChoiceList, TableView};

use crate::escape::html_escape;
use crate::labels::PageLabels;

/// Results table, or the empty-state message.
pub fn table_html(table: &TableView, empty_message: &str) -> String {
    let TableView::Rows { columns, rows } = table else {
        return format!(r#"<div class="empty">{}</div>"#, html_escape(empty_message));
    };
    let head: String = columns
        .iter()
        .map(|column| format!("<th>{}</th>", html_escape(column)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|value| format!("<td>{}</td>", html_escape(value)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!(
        r#"<div class="tablewrap"><table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>"#
    )
}

/// One badge per dimension, preceded by its label.
pub fn badges_html(badges: &[Badge], labels: &PageLabels) -> String {
    badges
        .iter()
        .map(|badge| {
            format!(
                r#"<span class="badge-label">{label}</span><span class="badge{muted}" id="badge_{dim}">{text}</span>"#,
                label = html_escape(labels.label(badge.dimension)),
                muted = if badge.restricted { "" } else { " muted" },
                dim = badge.dimension,
                text = html_escape(&badge.text),
            )
        })
        .collect()
}

/// `<option>` list for a single-select control, led by the empty prompt.
pub fn select_options_html(list: &ChoiceList, prompt: &str) -> String {
    let mut html = format!(r#"<option value="">{}</option>"#, html_escape(prompt));
    for option in &list.options {
        let value = html_escape(&option.value);
        let selected = if option.selected { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{value}"{selected}>{value}</option>"#
        ));
    }
    html
}

/// Checkbox list for a multi-select dropdown panel.
pub fn checkbox_list_html(list: &ChoiceList) -> String {
    let name = list.dimension;
    list.options
        .iter()
        .map(|option| {
            let value = html_escape(&option.value);
            let checked = if option.selected { " checked" } else { "" };
            format!(
                r#"<label class="chk"><input type="checkbox" name="{name}" value="{value}"{checked}>{value}</label>"#
            )
        })
        .collect()
}

/// Control group for one dimension in the cascading variant.
pub(crate) fn select_control_html(list: &ChoiceList, labels: &PageLabels) -> String {
    let dim = list.dimension;
    format!(
        r#"<div class="group">
        <label for="{dim}">{label}</label>
        <select id="{dim}" aria-label="{label}">{options}</select>
      </div>"#,
        label = html_escape(labels.label(dim)),
        options = select_options_html(list, labels.prompt(dim)),
    )
}

/// Dropdown panel with select-all / clear for one dimension.
pub(crate) fn dropdown_control_html(list: &ChoiceList, labels: &PageLabels) -> String {
    let dim = list.dimension;
    format!(
        r#"<div class="group" aria-label="{label}">
        <div class="dropdown">
          <button class="dropdown-toggle" id="dd-{dim}-btn" type="button" aria-expanded="false" aria-controls="dd-{dim}-panel">{prompt}</button>
          <div class="dropdown-panel" id="dd-{dim}-panel" role="listbox" aria-labelledby="dd-{dim}-btn">
            <div class="dropdown-actions">
              <button id="{dim}_select_all" type="button">{select_all}</button>
              <button id="{dim}_clear_all" type="button">{clear_all}</button>
            </div>
            <div id="{dim}_list" class="checkbox-list" aria-label="{label}">{items}</div>
          </div>
        </div>
      </div>"#,
        label = html_escape(labels.label(dim)),
        prompt = html_escape(labels.prompt(dim)),
        select_all = html_escape(&labels.select_all),
        clear_all = html_escape(&labels.clear_all),
        items = checkbox_list_html(list),
    )
}
