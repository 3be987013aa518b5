//! Application state - the EpiBoard struct definition and sub-structs.

use crate::data::{CaseSummary, LoadErrorKind};
use crate::data_table::TableModel;
use crate::render::{ChartRegistry, Layout, SummaryCard};
use crate::transport::Transport;
use crate::types::Dataset;
use serde::Serialize;

/// Where the board is in its load cycle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready {
        rows: usize,
    },
    Failed {
        kind: LoadErrorKind,
        message: String,
    },
}

impl LoadState {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }
}

/// The dashboard: one transport, one page layout, and the models of the
/// latest successful load.
pub struct EpiBoard<T: Transport> {
    pub(crate) transport: T,
    pub(crate) layout: Layout,
    pub(crate) status: StatusState,
    pub(crate) data: DataState,
    pub(crate) render: RenderState,
}

// =============================================================================
// Sub-structs
// =============================================================================

/// User-visible status and error text
#[derive(Debug, Default)]
pub struct StatusState {
    pub state: LoadState,
    /// Text for the status region
    pub message: String,
    /// Text for the error region
    pub error: Option<String>,
}

/// The loaded dataset and its aggregates
#[derive(Debug, Default)]
pub struct DataState {
    pub dataset: Option<Dataset>,
    pub summary: Option<CaseSummary>,
}

/// Everything drawn from the dataset
#[derive(Debug, Default)]
pub struct RenderState {
    pub cards: Vec<SummaryCard>,
    pub charts: ChartRegistry,
    pub table: Option<TableModel>,
    /// Whether the search input drives the table filter
    pub filter_attached: bool,
}
