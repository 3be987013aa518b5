//! Table model with live text filtering.
//!
//! The table mirrors a [`Dataset`] one row per record and one column per
//! header name. The search filter only toggles visibility; it never
//! reorders or drops rows.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut table = TableModel::from_dataset(&dataset);
//! let shown = table.apply_filter("ncr");
//! for row in table.visible_rows() {
//!     println!("{}", row.cells.join(" | "));
//! }
//! ```

use crate::types::Dataset;
use serde::Serialize;

/// A rendered table row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Whether the current filter shows this row
    pub visible: bool,
    #[serde(skip)]
    search_text: String,
}

impl TableRow {
    fn new(cells: Vec<String>) -> Self {
        let search_text = cells.concat().to_lowercase();
        Self {
            cells,
            visible: true,
            search_text,
        }
    }

    /// Whether the row's concatenated cell text contains `query`
    ///
    /// `query` must already be normalized with [`normalize_query`].
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.search_text.contains(query)
    }
}

/// Header + rows ready for tabular rendering
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TableModel {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Normalized query of the last filter pass
    pub query: String,
}

impl TableModel {
    /// Map a dataset onto a table, every row visible
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let width = dataset.header.len();
        let rows = dataset
            .rows
            .iter()
            .map(|row| TableRow::new((0..width).map(|i| row.cell(i).to_string()).collect()))
            .collect();

        Self {
            header: dataset.header.clone(),
            rows,
            query: String::new(),
        }
    }

    /// Recompute visibility of every row for `raw_query`
    ///
    /// Returns the number of visible rows.
    pub fn apply_filter(&mut self, raw_query: &str) -> usize {
        let query = normalize_query(raw_query);
        let mut shown = 0;
        for row in &mut self.rows {
            row.visible = row.matches(&query);
            if row.visible {
                shown += 1;
            }
        }
        self.query = query;
        shown
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|row| row.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Trim and lower-case a raw search query
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Format row count for display (e.g., "1.2K rows")
pub fn format_row_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M rows", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K rows", count as f64 / 1_000.0)
    } else {
        format!("{} rows", count)
    }
}
