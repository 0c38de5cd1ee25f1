use crate::datamodel::{MeasurementDateTime, MeasurementTable};
use crate::error::DashboardError;

/// Earliest and latest timestamp of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: MeasurementDateTime,
    pub max: MeasurementDateTime,
}

/// Compute the date bounds of a table, used to configure the date-range picker.
///
/// Scans the rows once, the result is the same as taking the first and last
/// rows of the sorted table.
pub fn bounds(reference: &str, table: &MeasurementTable) -> Result<DateBounds, DashboardError> {
    let mut rows = table.rows().iter();
    let first = rows.next().ok_or_else(|| DashboardError::EmptyData {
        reference: reference.to_string(),
    })?;

    let (min, max) = rows.fold((first.datetime, first.datetime), |(min, max), row| {
        (min.min(row.datetime), max.max(row.datetime))
    });

    Ok(DateBounds { min, max })
}
