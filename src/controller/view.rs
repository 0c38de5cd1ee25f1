use super::dispatcher::Dashboard;
use super::edges::EdgeState;
use crate::catalog::FileCatalog;
use crate::datamodel::{MeasurementDateTimeExt, Pollutant};
use crate::derivations::{DateBounds, SeriesData};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptionViewModel {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionViewModel {
    pub file: String,
    pub pollutant: String,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoundsViewModel {
    /// `pending`, `ready` or `failed`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    /// Bounds as displayed by the date picker (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Line chart data, x is the timestamp and y the pollutant reading.
///
/// Missing readings are serialized as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartViewModel {
    /// `pending`, `ready` or `failed`
    pub status: String,
    pub pollutant: String,
    pub label: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardViewModel {
    pub title: String,
    pub files: Vec<OptionViewModel>,
    pub pollutants: Vec<OptionViewModel>,
    pub selection: SelectionViewModel,
    pub bounds: BoundsViewModel,
    pub chart: ChartViewModel,
}

pub fn file_options(catalog: &FileCatalog) -> Vec<OptionViewModel> {
    catalog
        .files()
        .iter()
        .map(|file| OptionViewModel {
            label: file.name.clone(),
            value: file.name.clone(),
        })
        .collect()
}

pub fn pollutant_options() -> Vec<OptionViewModel> {
    Pollutant::ALL
        .iter()
        .map(|pollutant| OptionViewModel {
            label: pollutant.label().to_string(),
            value: pollutant.field_name().to_string(),
        })
        .collect()
}

impl From<DateBounds> for BoundsViewModel {
    fn from(bounds: DateBounds) -> Self {
        Self {
            status: "ready".to_string(),
            min: Some(bounds.min.to_datetime_string()),
            max: Some(bounds.max.to_datetime_string()),
            min_date: Some(bounds.min.to_date_string()),
            max_date: Some(bounds.max.to_date_string()),
            error: None,
        }
    }
}

impl From<&EdgeState<DateBounds>> for BoundsViewModel {
    fn from(state: &EdgeState<DateBounds>) -> Self {
        match state {
            EdgeState::Ready(bounds) => (*bounds).into(),
            EdgeState::Pending => Self::empty("pending", None),
            EdgeState::Failed(error) => Self::empty("failed", Some(error.clone())),
        }
    }
}

impl BoundsViewModel {
    fn empty(status: &str, error: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            min: None,
            max: None,
            min_date: None,
            max_date: None,
            error,
        }
    }
}

impl From<&SeriesData> for ChartViewModel {
    fn from(series: &SeriesData) -> Self {
        Self {
            status: "ready".to_string(),
            pollutant: series.pollutant.field_name().to_string(),
            label: series.pollutant.label().to_string(),
            x: series
                .points
                .iter()
                .map(|point| point.datetime.to_datetime_string())
                .collect(),
            y: series
                .points
                .iter()
                .map(|point| point.value.is_finite().then_some(point.value))
                .collect(),
            error: None,
        }
    }
}

impl ChartViewModel {
    pub fn from_state(state: &EdgeState<SeriesData>, pollutant: Pollutant) -> Self {
        let (status, error) = match state {
            EdgeState::Ready(series) => return series.into(),
            EdgeState::Pending => ("pending", None),
            EdgeState::Failed(error) => ("failed", Some(error.clone())),
        };
        Self {
            status: status.to_string(),
            pollutant: pollutant.field_name().to_string(),
            label: pollutant.label().to_string(),
            x: Vec::new(),
            y: Vec::new(),
            error,
        }
    }
}

impl DashboardViewModel {
    pub fn new(title: &str, dashboard: &Dashboard) -> Self {
        let selection = dashboard.selection();
        let outputs = dashboard.outputs();
        Self {
            title: title.to_string(),
            files: file_options(dashboard.catalog()),
            pollutants: pollutant_options(),
            selection: SelectionViewModel {
                file: selection.file.name.clone(),
                pollutant: selection.pollutant.field_name().to_string(),
                range_start: selection.range_start.map(|d| d.to_datetime_string()),
                range_end: selection.range_end.map(|d| d.to_datetime_string()),
            },
            bounds: (&outputs.bounds).into(),
            chart: ChartViewModel::from_state(&outputs.chart, selection.pollutant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::MeasurementDateTime;
    use crate::derivations::SeriesPoint;

    fn minute(minute: u8) -> MeasurementDateTime {
        MeasurementDateTime::from_calendar_minute(2023, 1, 1, 0, minute).unwrap()
    }

    #[test]
    fn test_pollutant_options_order() {
        let options = pollutant_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "CO2");
        assert_eq!(options[1].value, "CH4");
    }

    #[test]
    fn test_bounds_view_model() {
        let view: BoundsViewModel = (&EdgeState::Ready(DateBounds {
            min: minute(0),
            max: minute(5),
        }))
            .into();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["min"], "2023-01-01T00:00:00");
        assert_eq!(json["max_date"], "2023-01-01");
        assert!(json.get("error").is_none());

        let view: BoundsViewModel = (&EdgeState::Failed("empty".to_string())).into();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "empty");
        assert!(json.get("min").is_none());
    }

    #[test]
    fn test_chart_view_model() {
        let series = SeriesData {
            pollutant: Pollutant::Co2,
            points: vec![
                SeriesPoint {
                    datetime: minute(0),
                    value: 410.0,
                },
                SeriesPoint {
                    datetime: minute(5),
                    value: f64::NAN,
                },
            ],
        };
        let json = serde_json::to_value(ChartViewModel::from(&series)).unwrap();
        assert_eq!(
            json["x"],
            serde_json::json!(["2023-01-01T00:00:00", "2023-01-01T00:05:00"])
        );
        assert_eq!(json["y"], serde_json::json!([410.0, null]));
        assert_eq!(json["label"], "Carbon dioxide (CO₂)");
    }

    #[test]
    fn test_chart_view_model_failed() {
        let view = ChartViewModel::from_state(
            &EdgeState::Failed("boom".to_string()),
            Pollutant::Ch4,
        );
        assert_eq!(view.status, "failed");
        assert_eq!(view.pollutant, "CH4");
        assert!(view.x.is_empty());
        assert_eq!(view.error.as_deref(), Some("boom"));
    }
}
