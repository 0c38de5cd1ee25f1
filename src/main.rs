#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracegas::catalog::FileCatalog;
use tracegas::config::{self, load_configuration};
use tracegas::controller::Dashboard;
use tracegas::http::server::run_http_server;
use tracegas::http::state::HttpServerState;
use tracegas::importers::create_measurement_source;
use tracing::{Level, event, info};

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize tracing subscriber for HTTP request logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    // The file list is fixed for the lifetime of the process
    let catalog = Arc::new(
        FileCatalog::discover(&config.data_directory, &config.file_pattern)
            .context("Failed to list measurement files")?,
    );
    let source = create_measurement_source(config.table_cache_size);

    let mut dashboard = Dashboard::new(catalog.clone(), source.clone()).with_context(|| {
        format!(
            "Nothing to display in {}",
            config.data_directory.display()
        )
    })?;
    let fired = dashboard.initialize().await;
    info!("Initial render computed {:?}", fired);

    let address = SocketAddr::from((config.endpoint, config.port));

    info!("Starting HTTP server on {}...", address);
    match run_http_server(
        HttpServerState {
            title: Arc::new(config.title.clone()),
            catalog,
            source,
            dashboard: Arc::new(Mutex::new(dashboard)),
        },
        address,
    )
    .await
    {
        Ok(_) => {
            event!(Level::INFO, "HTTP server stopped gracefully");
            Ok(())
        }
        Err(err) => {
            event!(Level::ERROR, "HTTP server failed to start: {}", err);
            Err(err)
        }
    }
}
