use super::MeasurementSource;
use crate::catalog::FileReference;
use crate::datamodel::MeasurementTable;
use crate::error::DashboardError;
use async_trait::async_trait;
use clru::CLruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::debug;

type CacheEntry = (Option<SystemTime>, Arc<MeasurementTable>);

/// Memoizes parsed tables by path.
///
/// An entry is reused only while the file modification time is unchanged,
/// so the observable behaviour is the same as re-parsing every time.
pub struct CachedMeasurementSource<S> {
    inner: S,
    cache: Mutex<CLruCache<PathBuf, CacheEntry>>,
}

impl<S: MeasurementSource> CachedMeasurementSource<S> {
    pub fn new(inner: S, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(CLruCache::new(capacity)),
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CachedMeasurementSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedMeasurementSource")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: MeasurementSource> MeasurementSource for CachedMeasurementSource<S> {
    async fn load(&self, file: &FileReference) -> Result<Arc<MeasurementTable>, DashboardError> {
        let metadata = tokio::fs::metadata(&file.path)
            .await
            .map_err(|err| DashboardError::from_io(&file.name, err))?;
        let modified = metadata.modified().ok();

        {
            let mut cache = self.cache.lock().await;
            if let Some((cached_modified, table)) = cache.get(&file.path) {
                if modified.is_some() && *cached_modified == modified {
                    debug!("Measurement cache hit for {}", file.name);
                    return Ok(table.clone());
                }
            }
        }

        let table = self.inner.load(file).await?;
        self.cache
            .lock()
            .await
            .put(file.path.clone(), (modified, table.clone()));
        Ok(table)
    }
}
