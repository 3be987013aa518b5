//! Application lifecycle - construction and the load cycle.
//!
//! A load is Idle → Loading → {Ready | Failed}. Every model is computed
//! before any of them is installed, so a failing cycle leaves the previous
//! successful render untouched.

use super::state::{DataState, EpiBoard, LoadState, RenderState, StatusState};
use crate::constants::{
    CARDS_ELEMENT, ERROR_ELEMENT, SEARCH_ELEMENT, STATUS_ELEMENT, STATUS_FAILED, STATUS_IDLE,
    STATUS_LOADING, TABLE_ELEMENT,
};
use crate::data::{CaseSummary, LoadError, LoadResult};
use crate::data_table::TableModel;
use crate::render::{ChartId, Layout, SummaryCard, build_summary_cards};
use crate::transport::{Source, Transport};
use crate::types::{ChartModel, Dataset};
use tracing::{error, info};

/// Models computed for one cycle, not yet installed
struct Prepared {
    summary: CaseSummary,
    cards: Vec<SummaryCard>,
    charts: Vec<(ChartId, ChartModel)>,
    table: TableModel,
}

impl<T: Transport> EpiBoard<T> {
    pub fn new(transport: T) -> Self {
        Self::with_layout(transport, Layout::default())
    }

    pub fn with_layout(transport: T, layout: Layout) -> Self {
        Self {
            transport,
            layout,
            status: StatusState {
                state: LoadState::Idle,
                message: STATUS_IDLE.to_string(),
                error: None,
            },
            data: DataState::default(),
            render: RenderState::default(),
        }
    }

    /// Run one load cycle against `source`
    ///
    /// Returns the row count on success. On failure the error is also
    /// recorded in the board's status and error text.
    pub async fn load(&mut self, source: &Source) -> LoadResult<usize> {
        self.status.state = LoadState::Loading;
        self.status.message = STATUS_LOADING.to_string();
        self.status.error = None;
        info!(%source, "load started");

        match self.run_cycle(source).await {
            Ok(rows) => {
                info!(rows, "load finished");
                self.status.state = LoadState::Ready { rows };
                self.status.message = format!("Loaded {rows} rows");
                Ok(rows)
            }
            Err(err) => {
                error!(kind = ?err.kind(), error = %err, "load failed");
                self.status.state = LoadState::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                };
                self.status.message = STATUS_FAILED.to_string();
                self.status.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn run_cycle(&mut self, source: &Source) -> LoadResult<usize> {
        let payload = self.transport.fetch(source).await?;
        let dataset = payload.into_dataset()?;
        let prepared = self.prepare(&dataset)?;
        let rows = dataset.row_count();
        self.install(dataset, prepared);
        Ok(rows)
    }

    /// Build every model for `dataset` and check the page can show them
    fn prepare(&self, dataset: &Dataset) -> LoadResult<Prepared> {
        for element in [
            STATUS_ELEMENT,
            ERROR_ELEMENT,
            CARDS_ELEMENT,
            TABLE_ELEMENT,
            SEARCH_ELEMENT,
        ] {
            self.layout.require(element)?;
        }

        let summary = CaseSummary::from_dataset(dataset);
        let cards = build_summary_cards(&summary);
        let charts = ChartId::all()
            .iter()
            .map(|id| {
                self.layout.require(id.surface())?;
                Ok::<_, LoadError>((*id, id.model(&summary)))
            })
            .collect::<LoadResult<Vec<_>>>()?;
        let table = TableModel::from_dataset(dataset);

        Ok(Prepared {
            summary,
            cards,
            charts,
            table,
        })
    }

    /// Replace the rendered state wholesale
    fn install(&mut self, dataset: Dataset, prepared: Prepared) {
        for (id, model) in prepared.charts {
            self.render.charts.replace(id, model);
        }
        self.render.cards = prepared.cards;
        self.render.table = Some(prepared.table);
        self.render.filter_attached = true;

        self.data.summary = Some(prepared.summary);
        self.data.dataset = Some(dataset);
    }
}
