pub mod bounds;
pub mod chart;

pub use bounds::{DateBounds, bounds};
pub use chart::{SeriesData, SeriesPoint, chart, chart_for};
