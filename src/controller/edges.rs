use super::control::{Control, Selection};
use crate::derivations::{DateBounds, SeriesData, bounds, chart_for};
use crate::error::DashboardError;
use crate::importers::MeasurementSource;
use async_trait::async_trait;
use std::fmt::Debug;

/// Output of a reactive edge, kept by the dispatcher until the next recomputation.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeState<T> {
    /// Not computed yet
    Pending,
    Ready(T),
    /// The last recomputation failed, with its error message
    Failed(String),
}

impl<T> EdgeState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            EdgeState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Result of one edge recomputation.
#[derive(Debug)]
pub enum EdgeOutput {
    Bounds(Result<DateBounds, DashboardError>),
    Chart(Result<SeriesData, DashboardError>),
}

/// A declared `inputs -> output` recomputation rule.
#[async_trait]
pub trait ReactiveEdge: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Controls whose changes trigger this edge.
    fn dependencies(&self) -> &'static [Control];

    /// Recompute the output from scratch. Must not depend on anything but
    /// the selection and the file content.
    async fn recompute(&self, selection: &Selection, source: &dyn MeasurementSource)
    -> EdgeOutput;
}

/// Loads the selected file and derives the date-range picker bounds.
#[derive(Debug, Default)]
pub struct DateBoundsEdge;

#[async_trait]
impl ReactiveEdge for DateBoundsEdge {
    fn name(&self) -> &'static str {
        "date_bounds"
    }

    fn dependencies(&self) -> &'static [Control] {
        &[Control::File]
    }

    async fn recompute(
        &self,
        selection: &Selection,
        source: &dyn MeasurementSource,
    ) -> EdgeOutput {
        let result = match source.load(&selection.file).await {
            Ok(table) => bounds(&selection.file.name, &table),
            Err(err) => Err(err),
        };
        EdgeOutput::Bounds(result)
    }
}

/// Loads the selected file and builds the chart series.
#[derive(Debug, Default)]
pub struct ChartEdge;

#[async_trait]
impl ReactiveEdge for ChartEdge {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn dependencies(&self) -> &'static [Control] {
        &Control::ALL
    }

    async fn recompute(
        &self,
        selection: &Selection,
        source: &dyn MeasurementSource,
    ) -> EdgeOutput {
        let result = source
            .load(&selection.file)
            .await
            .map(|table| chart_for(&table, selection.pollutant, selection.range()));
        EdgeOutput::Chart(result)
    }
}
