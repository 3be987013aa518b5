//! Table search - the live text filter wired up by a successful load.

use super::state::EpiBoard;
use crate::transport::Transport;
use tracing::trace;

impl<T: Transport> EpiBoard<T> {
    /// Apply a search query to the table, returning the visible row count
    ///
    /// `None` until a load has attached the filter.
    pub fn search(&mut self, raw_query: &str) -> Option<usize> {
        if !self.render.filter_attached {
            return None;
        }
        let table = self.render.table.as_mut()?;
        let shown = table.apply_filter(raw_query);
        trace!(query = %table.query, shown, total = table.row_count(), "filtered table");
        Some(shown)
    }

    pub fn is_filter_attached(&self) -> bool {
        self.render.filter_attached
    }
}
