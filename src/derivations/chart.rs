use super::bounds::DateBounds;
use crate::datamodel::{MeasurementDateTime, MeasurementTable, Pollutant};
use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub datetime: MeasurementDateTime,
    pub value: f64,
}

/// Line chart data: one pollutant over time, ordered by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub pollutant: Pollutant,
    pub points: Vec<SeriesPoint>,
}

impl SeriesData {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build the chart series for a pollutant given by its field name.
///
/// Fails with [`DashboardError::InvalidField`] when the field is neither
/// CH4 nor CO2.
pub fn chart(
    table: &MeasurementTable,
    pollutant: &str,
    range: Option<DateBounds>,
) -> Result<SeriesData, DashboardError> {
    let pollutant: Pollutant = pollutant.parse()?;
    Ok(chart_for(table, pollutant, range))
}

/// Sort the table, keep the rows within the inclusive range if any, and
/// project them on the pollutant.
///
/// A range whose start is after its end selects nothing.
pub fn chart_for(
    table: &MeasurementTable,
    pollutant: Pollutant,
    range: Option<DateBounds>,
) -> SeriesData {
    let points = table
        .sorted()
        .into_iter()
        .filter(|row| match range {
            Some(DateBounds { min, max }) => row.datetime >= min && row.datetime <= max,
            None => true,
        })
        .map(|row| SeriesPoint {
            datetime: row.datetime,
            value: row.value_of(pollutant),
        })
        .collect();

    SeriesData { pollutant, points }
}
