use crate::catalog::FileCatalog;
use crate::controller::Dashboard;
use crate::importers::MeasurementSource;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct HttpServerState {
    pub title: Arc<String>,
    pub catalog: Arc<FileCatalog>,
    pub source: Arc<dyn MeasurementSource>,
    /// Control events are processed one at a time
    pub dashboard: Arc<Mutex<Dashboard>>,
}
