use std::fmt::Display;
use thiserror::Error;

/// Errors raised while loading a measurement file or deriving dashboard data.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The file reference is unknown or the file does not exist
    #[error("Measurement file not found: {reference}")]
    NotFound { reference: String },

    /// A row does not have the expected columns or types
    #[error("Failed to parse {reference} at line {line}: {message}")]
    Parse {
        reference: String,
        line: u64,
        message: String,
    },

    /// No rows to derive date bounds from
    #[error("No measurements available in {reference}")]
    EmptyData { reference: String },

    /// Pollutant field outside of CH4 and CO2
    #[error("Invalid pollutant field '{field}', expected CH4 or CO2")]
    InvalidField { field: String },

    /// A datetime that cannot be used as a range bound
    #[error("Invalid datetime '{value}': {message}")]
    InvalidDateTime { value: String, message: String },

    /// Any other I/O failure while reading a file
    #[error("Failed to read {reference}: {source}")]
    Io {
        reference: String,
        #[source]
        source: std::io::Error,
    },
}

impl DashboardError {
    pub fn parse(reference: &str, line: u64, message: impl Display) -> Self {
        DashboardError::Parse {
            reference: reference.to_string(),
            line,
            message: message.to_string(),
        }
    }

    pub fn invalid_datetime(value: &str, message: impl Display) -> Self {
        DashboardError::InvalidDateTime {
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    /// Map an I/O error, keeping missing files distinct from other failures.
    pub fn from_io(reference: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DashboardError::NotFound {
                reference: reference.to_string(),
            }
        } else {
            DashboardError::Io {
                reference: reference.to_string(),
                source,
            }
        }
    }
}
