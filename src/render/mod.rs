//! Presentation module
//!
//! Shapes datasets and aggregates into what the page draws:
//! - `cards` - Headline figures
//! - `charts` - Chart surfaces and the chart-handle registry
//! - `page` - HTML rendering of a dashboard snapshot

mod cards;
mod charts;
mod page;

pub use cards::*;
pub use charts::*;
pub use page::*;

use crate::constants::{CARDS_ELEMENT, ERROR_ELEMENT, SEARCH_ELEMENT, STATUS_ELEMENT, TABLE_ELEMENT};
use crate::data::{LoadError, LoadResult};
use crate::data_table::TableModel;
use serde::Serialize;
use std::collections::BTreeSet;

/// The element identifiers a page provides
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    elements: BTreeSet<String>,
}

impl Default for Layout {
    fn default() -> Self {
        let fixed = [
            STATUS_ELEMENT,
            ERROR_ELEMENT,
            TABLE_ELEMENT,
            SEARCH_ELEMENT,
            CARDS_ELEMENT,
        ];
        let surfaces = ChartId::all().iter().map(|id| id.surface());
        Self {
            elements: fixed.into_iter().chain(surfaces).map(str::to_string).collect(),
        }
    }
}

impl Layout {
    /// Remove an element, e.g. a page variant without some chart
    pub fn without(mut self, element: &str) -> Self {
        self.elements.remove(element);
        self
    }

    pub fn has(&self, element: &str) -> bool {
        self.elements.contains(element)
    }

    pub fn require(&self, element: &str) -> LoadResult<()> {
        if self.has(element) {
            Ok(())
        } else {
            Err(LoadError::Render(format!("missing render target '{element}'")))
        }
    }
}

/// Everything the page shows after a load cycle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub status: String,
    pub error: Option<String>,
    pub cards: Vec<SummaryCard>,
    pub charts: Vec<ChartHandle>,
    pub table: Option<TableModel>,
}

impl DashboardView {
    /// Copy of this view with the search filter applied to its table
    pub fn filtered(&self, query: &str) -> Self {
        let mut view = self.clone();
        if let Some(table) = view.table.as_mut() {
            table.apply_filter(query);
        }
        view
    }
}
