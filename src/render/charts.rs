//! Chart surfaces and the chart-handle registry.
//!
//! Each chart on the page has one stable identifier and at most one live
//! handle. Re-rendering goes through [`ChartRegistry::replace`], which
//! disposes the previous handle before installing its successor, so a
//! reload never leaves two overlapping charts on a surface.

use crate::data::CaseSummary;
use crate::types::{ChartKind, ChartModel};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// The dashboard's chart surfaces
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Region,
    Yearly,
    Sex,
    Risk,
    Transmission,
    AgeGroup,
}

impl ChartId {
    pub fn all() -> &'static [ChartId] {
        &[
            ChartId::Region,
            ChartId::Yearly,
            ChartId::Sex,
            ChartId::Risk,
            ChartId::Transmission,
            ChartId::AgeGroup,
        ]
    }

    /// Element identifier of the drawing surface
    pub fn surface(&self) -> &'static str {
        match self {
            ChartId::Region => "regionChart",
            ChartId::Yearly => "yearlyChart",
            ChartId::Sex => "sexChart",
            ChartId::Risk => "riskChart",
            ChartId::Transmission => "transmissionChart",
            ChartId::AgeGroup => "ageChart",
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartId::Region | ChartId::AgeGroup => ChartKind::Bar,
            ChartId::Yearly => ChartKind::Line,
            ChartId::Sex => ChartKind::Doughnut,
            ChartId::Risk => ChartKind::Pie,
            ChartId::Transmission => ChartKind::HorizontalBar,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartId::Region => "Cases by Region",
            ChartId::Yearly => "Yearly Trend",
            ChartId::Sex => "Sex Ratio",
            ChartId::Risk => "Risk Categories",
            ChartId::Transmission => "Mode of Transmission",
            ChartId::AgeGroup => "Age Groups",
        }
    }

    /// Chart model for this surface from a case summary
    pub fn model(&self, summary: &CaseSummary) -> ChartModel {
        let aggregate = match self {
            ChartId::Region => &summary.regions,
            ChartId::Yearly => &summary.yearly,
            ChartId::Sex => &summary.sex,
            ChartId::Risk => &summary.risk,
            ChartId::Transmission => &summary.transmission,
            ChartId::AgeGroup => &summary.age_groups,
        };
        aggregate.to_chart_model()
    }
}

/// A live chart instance on one surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartHandle {
    pub id: ChartId,
    pub surface: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub model: ChartModel,
    /// Registry-wide creation counter, increases with every replace
    pub generation: u64,
}

impl ChartHandle {
    fn create(id: ChartId, model: ChartModel, generation: u64) -> Self {
        Self {
            id,
            surface: id.surface(),
            kind: id.kind(),
            title: id.title(),
            model,
            generation,
        }
    }

    fn dispose(self) {
        debug!(
            surface = self.surface,
            generation = self.generation,
            "disposed chart"
        );
    }
}

/// Owner of every live chart handle, keyed by chart identifier
#[derive(Debug, Default)]
pub struct ChartRegistry {
    handles: HashMap<ChartId, ChartHandle>,
    generation: u64,
    disposed: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the handle on `id`, if any, then create one for `model`
    pub fn replace(&mut self, id: ChartId, model: ChartModel) -> &ChartHandle {
        if let Some(previous) = self.handles.remove(&id) {
            previous.dispose();
            self.disposed += 1;
        }

        self.generation += 1;
        let handle = ChartHandle::create(id, model, self.generation);
        debug!(
            surface = handle.surface,
            generation = handle.generation,
            points = handle.model.len(),
            "created chart"
        );
        self.handles.entry(id).or_insert(handle)
    }

    pub fn get(&self, id: ChartId) -> Option<&ChartHandle> {
        self.handles.get(&id)
    }

    /// Live handles in [`ChartId::all`] order
    pub fn handles(&self) -> Vec<&ChartHandle> {
        ChartId::all()
            .iter()
            .filter_map(|id| self.handles.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of handles disposed over the registry's lifetime
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}
