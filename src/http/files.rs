use super::app_error::AppError;
use super::state::HttpServerState;
use crate::controller::view::{BoundsViewModel, ChartViewModel, OptionViewModel, file_options};
use crate::datamodel::Pollutant;
use crate::datamodel::measurement_datetime::{RangeSide, parse_optional_range_value};
use crate::derivations::{DateBounds, bounds, chart};
use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChartQuery {
    /// Pollutant field, CO2 by default
    pub pollutant: Option<String>,
    /// Inclusive range start, ISO 8601 datetime or date
    pub start: Option<String>,
    /// Inclusive range end, ISO 8601 datetime or date
    pub end: Option<String>,
}

/// List the measurement files, sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1/files",
    tag = "Files",
    responses(
        (status = 200, description = "Measurement files", body = Vec<OptionViewModel>)
    )
)]
pub async fn list_files(State(state): State<HttpServerState>) -> Json<Vec<OptionViewModel>> {
    Json(file_options(&state.catalog))
}

/// Earliest and latest measurement of a file.
#[utoipa::path(
    get,
    path = "/api/v1/files/{name}/bounds",
    tag = "Files",
    responses(
        (status = 200, description = "Date bounds", body = BoundsViewModel),
        (status = 404, description = "Not Found", body = AppError),
        (status = 422, description = "Unreadable or empty file", body = AppError),
    ),
    params(
        ("name" = String, Path, description = "File name", example = "2023-01.csv"),
    )
)]
pub async fn file_bounds(
    State(state): State<HttpServerState>,
    Path(name): Path<String>,
) -> Result<Json<BoundsViewModel>, AppError> {
    let file = state.catalog.resolve(&name)?;
    let table = state.source.load(file).await?;
    Ok(Json(bounds(&file.name, &table)?.into()))
}

/// Chart series of a file, optionally restricted to a date range.
#[utoipa::path(
    get,
    path = "/api/v1/files/{name}/chart",
    tag = "Files",
    responses(
        (status = 200, description = "Chart series", body = ChartViewModel),
        (status = 400, description = "Bad Request", body = AppError),
        (status = 404, description = "Not Found", body = AppError),
        (status = 422, description = "Unreadable file", body = AppError),
    ),
    params(
        ("name" = String, Path, description = "File name", example = "2023-01.csv"),
        ChartQuery,
    )
)]
pub async fn file_chart(
    State(state): State<HttpServerState>,
    Path(name): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartViewModel>, AppError> {
    let pollutant = query
        .pollutant
        .unwrap_or_else(|| Pollutant::default().field_name().to_string());
    let start = parse_optional_range_value(query.start.as_deref(), RangeSide::Start)?;
    let end = parse_optional_range_value(query.end.as_deref(), RangeSide::End)?;
    let range = match (start, end) {
        (Some(min), Some(max)) => Some(DateBounds { min, max }),
        _ => None,
    };

    let file = state.catalog.resolve(&name)?;
    let table = state.source.load(file).await?;
    let series = chart(&table, &pollutant, range)?;
    Ok(Json((&series).into()))
}
