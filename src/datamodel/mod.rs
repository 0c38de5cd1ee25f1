pub mod measurement;
pub mod measurement_datetime;
pub mod pollutant;

pub use measurement::{Measurement, MeasurementTable};
pub use measurement_datetime::{MeasurementDateTime, MeasurementDateTimeExt};
pub use pollutant::Pollutant;
