use crate::catalog::FileReference;
use crate::datamodel::MeasurementTable;
use crate::error::DashboardError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub mod cache;
pub mod tsv;

/// Something able to turn a file reference into a measurement table.
///
/// Implementations must behave as a pure function of the file content:
/// loading the same file twice yields identical tables.
#[async_trait]
pub trait MeasurementSource: Send + Sync + Debug {
    async fn load(&self, file: &FileReference) -> Result<Arc<MeasurementTable>, DashboardError>;
}

/// Build the loader used by the dashboard.
///
/// A `cache_size` of 0 disables memoization and re-parses files on every call.
pub fn create_measurement_source(cache_size: usize) -> Arc<dyn MeasurementSource> {
    match NonZeroUsize::new(cache_size) {
        Some(capacity) => Arc::new(cache::CachedMeasurementSource::new(
            tsv::TsvMeasurementSource,
            capacity,
        )),
        None => Arc::new(tsv::TsvMeasurementSource),
    }
}
