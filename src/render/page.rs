//! HTML rendering of a dashboard snapshot.
//!
//! The page template is embedded at compile time. Chart models are written
//! into `application/json` script blocks next to their canvas so the
//! plotting library can pick them up by surface identifier.

use super::DashboardView;
use crate::constants::{CARDS_ELEMENT, ERROR_ELEMENT, SEARCH_ELEMENT, STATUS_ELEMENT, TABLE_ELEMENT};
use crate::data_table::format_row_count;
use minijinja::{Environment, Error, context};
use once_cell::sync::Lazy;

const TEMPLATE_NAME: &str = "dashboard.html";

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    // The name ends in .html, so the default callback turns on HTML escaping.
    env.add_template(TEMPLATE_NAME, include_str!("../../templates/dashboard.html"))
        .expect("embedded dashboard template should parse");
    env
});

/// Render the dashboard page with `query` applied to the table
pub fn render_page(view: &DashboardView, query: &str) -> Result<String, Error> {
    let view = view.filtered(query);
    let (visible, total) = view
        .table
        .as_ref()
        .map(|t| (t.visible_count(), t.row_count()))
        .unwrap_or((0, 0));

    let tpl = ENV.get_template(TEMPLATE_NAME)?;
    tpl.render(context! {
        view => view,
        query => query.trim(),
        visible => visible,
        total_label => format_row_count(total),
        ids => context! {
            status => STATUS_ELEMENT,
            error => ERROR_ELEMENT,
            table => TABLE_ELEMENT,
            search => SEARCH_ELEMENT,
            cards => CARDS_ELEMENT,
        },
    })
}
