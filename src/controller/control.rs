use crate::catalog::FileReference;
use crate::datamodel::{MeasurementDateTime, Pollutant};
use crate::derivations::DateBounds;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User facing input controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    File,
    Pollutant,
    RangeStart,
    RangeEnd,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::File,
        Control::Pollutant,
        Control::RangeStart,
        Control::RangeEnd,
    ];
}

/// A change of one control value, as sent by the dashboard page.
///
/// Values are raw strings, they are validated before being applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum ControlEvent {
    /// Select a measurement file by name
    File(String),
    /// Select the pollutant field, CO2 or CH4
    Pollutant(String),
    /// Set or clear the start of the date range
    RangeStart(Option<String>),
    /// Set or clear the end of the date range
    RangeEnd(Option<String>),
}

impl ControlEvent {
    pub fn control(&self) -> Control {
        match self {
            ControlEvent::File(_) => Control::File,
            ControlEvent::Pollutant(_) => Control::Pollutant,
            ControlEvent::RangeStart(_) => Control::RangeStart,
            ControlEvent::RangeEnd(_) => Control::RangeEnd,
        }
    }
}

/// Current control values.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub file: FileReference,
    pub pollutant: Pollutant,
    pub range_start: Option<MeasurementDateTime>,
    pub range_end: Option<MeasurementDateTime>,
}

impl Selection {
    pub fn new(file: FileReference) -> Self {
        Self {
            file,
            pollutant: Pollutant::default(),
            range_start: None,
            range_end: None,
        }
    }

    /// The active range, only when both ends are set.
    pub fn range(&self) -> Option<DateBounds> {
        match (self.range_start, self.range_end) {
            (Some(min), Some(max)) => Some(DateBounds { min, max }),
            _ => None,
        }
    }
}
