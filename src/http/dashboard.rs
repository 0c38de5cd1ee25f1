use super::app_error::AppError;
use super::state::HttpServerState;
use crate::controller::ControlEvent;
use crate::controller::view::DashboardViewModel;
use axum::Json;
use axum::extract::State;
use axum::response::Html;

const DASHBOARD_PAGE: &str = include_str!("assets/dashboard.html");

/// Dashboard page.
#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard HTML page", body = String, content_type = "text/html")
    )
)]
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// Current control values, picker bounds and chart.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard state", body = DashboardViewModel)
    )
)]
pub async fn get_dashboard(State(state): State<HttpServerState>) -> Json<DashboardViewModel> {
    let dashboard = state.dashboard.lock().await;
    Json(DashboardViewModel::new(&state.title, &dashboard))
}

/// Change one control and get the recomputed dashboard.
///
/// Selecting a file resets the date range to the bounds of the file.
/// Failures while loading the file are reported in the `bounds` and `chart`
/// outputs, invalid control values are rejected.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/events",
    tag = "Dashboard",
    request_body = ControlEvent,
    responses(
        (status = 200, description = "Updated dashboard state", body = DashboardViewModel),
        (status = 400, description = "Bad Request", body = AppError),
        (status = 404, description = "Not Found", body = AppError),
    )
)]
pub async fn post_event(
    State(state): State<HttpServerState>,
    Json(event): Json<ControlEvent>,
) -> Result<Json<DashboardViewModel>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.dispatch(event).await?;
    Ok(Json(DashboardViewModel::new(&state.title, &dashboard)))
}
