use super::control::{Control, ControlEvent, Selection};
use super::edges::{ChartEdge, DateBoundsEdge, EdgeOutput, EdgeState, ReactiveEdge};
use crate::catalog::FileCatalog;
use crate::datamodel::measurement_datetime::{RangeSide, parse_optional_range_value};
use crate::datamodel::{MeasurementDateTime, Pollutant};
use crate::derivations::{DateBounds, SeriesData};
use crate::error::DashboardError;
use crate::importers::MeasurementSource;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Latest output of every edge.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOutputs {
    pub bounds: EdgeState<DateBounds>,
    pub chart: EdgeState<SeriesData>,
}

impl DashboardOutputs {
    /// True until every edge has run at least once.
    pub fn is_pending(&self) -> bool {
        matches!(self.bounds, EdgeState::Pending) || matches!(self.chart, EdgeState::Pending)
    }
}

/// Dispatcher owning the control values and the edge outputs.
///
/// Edges are evaluated in declaration order, so an edge writing controls
/// must come before the edges depending on them.
#[derive(Debug)]
pub struct Dashboard {
    catalog: Arc<FileCatalog>,
    source: Arc<dyn MeasurementSource>,
    edges: Vec<Box<dyn ReactiveEdge>>,
    selection: Selection,
    outputs: DashboardOutputs,
}

impl Dashboard {
    /// Create a dashboard selecting the first file of the catalog.
    ///
    /// Outputs stay pending until [`Dashboard::initialize`] is called.
    pub fn new(catalog: Arc<FileCatalog>, source: Arc<dyn MeasurementSource>) -> Result<Self> {
        let file = catalog
            .default_file()
            .cloned()
            .context("No measurement files found")?;

        Ok(Self {
            catalog,
            source,
            edges: vec![Box::new(DateBoundsEdge), Box::new(ChartEdge)],
            selection: Selection::new(file),
            outputs: DashboardOutputs {
                bounds: EdgeState::Pending,
                chart: EdgeState::Pending,
            },
        })
    }

    pub fn catalog(&self) -> &FileCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn outputs(&self) -> &DashboardOutputs {
        &self.outputs
    }

    /// First render: every edge runs once.
    pub async fn initialize(&mut self) -> Vec<&'static str> {
        self.propagate(Control::ALL.into_iter().collect()).await
    }

    /// Apply one control change and recompute the dependent edges.
    ///
    /// Returns the names of the edges that ran. An invalid event is rejected
    /// and leaves the dashboard untouched. Failures inside an edge are kept
    /// in its output instead.
    pub async fn dispatch(
        &mut self,
        event: ControlEvent,
    ) -> Result<Vec<&'static str>, DashboardError> {
        debug!("Dispatching {:?}", event);
        let changed = self.apply_event(event)?;
        match changed {
            Some(control) => Ok(self.propagate(HashSet::from([control])).await),
            None => Ok(Vec::new()),
        }
    }

    fn apply_event(&mut self, event: ControlEvent) -> Result<Option<Control>, DashboardError> {
        let control = event.control();
        let changed = match event {
            ControlEvent::File(name) => {
                let file = self.catalog.resolve(&name)?.clone();
                replace(&mut self.selection.file, file)
            }
            ControlEvent::Pollutant(field) => {
                let pollutant: Pollutant = field.parse()?;
                replace(&mut self.selection.pollutant, pollutant)
            }
            ControlEvent::RangeStart(value) => {
                let start = parse_optional_range_value(value.as_deref(), RangeSide::Start)?;
                replace(&mut self.selection.range_start, start)
            }
            ControlEvent::RangeEnd(value) => {
                let end = parse_optional_range_value(value.as_deref(), RangeSide::End)?;
                replace(&mut self.selection.range_end, end)
            }
        };
        Ok(changed.then_some(control))
    }

    async fn propagate(&mut self, mut dirty: HashSet<Control>) -> Vec<&'static str> {
        let mut fired = Vec::new();
        for index in 0..self.edges.len() {
            let edge = &self.edges[index];
            if !edge.dependencies().iter().any(|control| dirty.contains(control)) {
                continue;
            }
            let name = edge.name();
            let output = edge.recompute(&self.selection, self.source.as_ref()).await;
            fired.push(name);
            dirty.extend(self.apply_output(name, output));
        }
        fired
    }

    /// Store an edge output, returning the controls it wrote.
    fn apply_output(&mut self, edge: &str, output: EdgeOutput) -> Vec<Control> {
        match output {
            EdgeOutput::Bounds(Ok(bounds)) => {
                self.outputs.bounds = EdgeState::Ready(bounds);
                // The active range is reset to the whole file
                self.set_range(Some(bounds.min), Some(bounds.max))
            }
            EdgeOutput::Bounds(Err(err)) => {
                warn!("Edge {} failed for {}: {}", edge, self.selection.file.name, err);
                self.outputs.bounds = EdgeState::Failed(err.to_string());
                self.set_range(None, None)
            }
            EdgeOutput::Chart(Ok(series)) => {
                info!(
                    "Chart of {} for {} updated with {} points",
                    series.pollutant,
                    self.selection.file.name,
                    series.points.len()
                );
                self.outputs.chart = EdgeState::Ready(series);
                Vec::new()
            }
            EdgeOutput::Chart(Err(err)) => {
                warn!("Edge {} failed for {}: {}", edge, self.selection.file.name, err);
                self.outputs.chart = EdgeState::Failed(err.to_string());
                Vec::new()
            }
        }
    }

    fn set_range(
        &mut self,
        start: Option<MeasurementDateTime>,
        end: Option<MeasurementDateTime>,
    ) -> Vec<Control> {
        let mut written = Vec::new();
        if replace(&mut self.selection.range_start, start) {
            written.push(Control::RangeStart);
        }
        if replace(&mut self.selection.range_end, end) {
            written.push(Control::RangeEnd);
        }
        written
    }
}

// Returns whether the value changed
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
