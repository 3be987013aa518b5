//! Read access to the board's current models.

use super::state::{EpiBoard, LoadState};
use crate::data::CaseSummary;
use crate::data_table::TableModel;
use crate::render::{ChartRegistry, DashboardView, SummaryCard};
use crate::transport::Transport;
use crate::types::Dataset;

impl<T: Transport> EpiBoard<T> {
    pub fn state(&self) -> &LoadState {
        &self.status.state
    }

    pub fn status(&self) -> &str {
        &self.status.message
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error.as_deref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.data.dataset.as_ref()
    }

    pub fn summary(&self) -> Option<&CaseSummary> {
        self.data.summary.as_ref()
    }

    pub fn cards(&self) -> &[SummaryCard] {
        &self.render.cards
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.render.charts
    }

    pub fn table(&self) -> Option<&TableModel> {
        self.render.table.as_ref()
    }

    /// Snapshot of everything the page shows
    pub fn view(&self) -> DashboardView {
        DashboardView {
            status: self.status.message.clone(),
            error: self.status.error.clone(),
            cards: self.render.cards.clone(),
            charts: self.render.charts.handles().into_iter().cloned().collect(),
            table: self.render.table.clone(),
        }
    }
}
