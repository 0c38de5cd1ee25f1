use anyhow::Error;
use confique::Config;
use std::{
    net::IpAddr,
    path::PathBuf,
    sync::{Arc, OnceLock},
};

#[derive(Debug, Config)]
pub struct TraceGasConfig {
    #[config(env = "TRACEGAS_PORT", default = 8050)]
    pub port: u16,
    #[config(env = "TRACEGAS_ENDPOINT", default = "127.0.0.1")]
    pub endpoint: IpAddr,

    #[config(env = "TRACEGAS_TITLE", default = "Trace gas analysis")]
    pub title: String,

    /// Directory scanned once at startup for measurement files
    #[config(env = "TRACEGAS_DATA_DIRECTORY", default = "data")]
    pub data_directory: PathBuf,

    #[config(env = "TRACEGAS_FILE_PATTERN", default = "*.csv")]
    pub file_pattern: String,

    #[config(env = "TRACEGAS_HTTP_BODY_LIMIT", default = "1mb")]
    pub http_body_limit: String,

    #[config(env = "TRACEGAS_HTTP_SERVER_TIMEOUT_SECONDS", default = 30)]
    pub http_server_timeout_seconds: u64,

    /// Number of parsed files kept in memory, 0 disables the cache
    #[config(env = "TRACEGAS_TABLE_CACHE_SIZE", default = 0)]
    pub table_cache_size: usize,

    #[config(env = "TRACEGAS_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl TraceGasConfig {
    pub fn load() -> Result<TraceGasConfig, Error> {
        let c = TraceGasConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn parse_http_body_limit(&self) -> Result<usize, Error> {
        let size = byte_unit::Byte::parse_str(self.http_body_limit.clone(), true)?.as_u64();
        if size > 1024 * 1024 * 1024 {
            anyhow::bail!("Body size is too big: > 1GB");
        }
        Ok(size as usize)
    }
}

static TRACEGAS_CONFIG: OnceLock<Arc<TraceGasConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<TraceGasConfig>, Error> {
    TRACEGAS_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if TRACEGAS_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = TraceGasConfig::load()?;
    TRACEGAS_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}
