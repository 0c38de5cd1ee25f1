use super::dashboard::{dashboard_page, get_dashboard, post_event};
use super::files::{file_bounds, file_chart, list_files};
use super::health::{liveness, readiness};
use super::state::HttpServerState;
use crate::config;
use crate::http::dashboard::{__path_dashboard_page, __path_get_dashboard, __path_post_event};
use crate::http::files::{__path_file_bounds, __path_file_chart, __path_list_files};
use crate::http::health::{__path_liveness, __path_readiness};
use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace;
use tower_http::{ServiceBuilderExt, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Dashboard", description = "Reactive dashboard controls"),
        (name = "Files", description = "Measurement files"),
        (name = "Health", description = "Health checks"),
    ),
    paths(dashboard_page, get_dashboard, post_event,
        list_files, file_bounds, file_chart,
        liveness, readiness),
)]
struct ApiDoc;

/// Routes of the dashboard, without middleware.
pub fn create_router(state: HttpServerState, body_limit: usize) -> Router {
    let max_body_layer = DefaultBodyLimit::max(body_limit);

    Router::new()
        .route("/", get(dashboard_page))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        // Reactive controller
        .route("/api/v1/dashboard", get(get_dashboard))
        .route(
            "/api/v1/dashboard/events",
            post(post_event).layer(max_body_layer),
        )
        // Stateless queries
        .route("/api/v1/files", get(list_files))
        .route("/api/v1/files/{name}/bounds", get(file_bounds))
        .route("/api/v1/files/{name}/chart", get(file_chart))
        // Health
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .with_state(state)
}

pub async fn run_http_server(state: HttpServerState, address: SocketAddr) -> Result<()> {
    let config = config::get()?;
    let body_limit = config.parse_http_body_limit()?;
    let timeout_seconds = config.http_server_timeout_seconds;

    // List of headers that shouldn't be logged
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // Middleware creation
    let middleware = ServiceBuilder::new()
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
        .compression()
        .into_inner();

    let app = create_router(state, body_limit).layer(middleware);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Dashboard available at http://{}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown CTRL+C signal handler: {}", err);
    }
}
