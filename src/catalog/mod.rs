use crate::error::DashboardError;
use anyhow::{Context, Result};
use glob::glob;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A measurement file known to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReference {
    /// File name, used as the identifier in the selector and the API
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl FileReference {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { name, path }
    }
}

/// The fixed set of measurement files discovered at startup.
///
/// Files are sorted by path, the first one is the default selection.
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    files: Vec<FileReference>,
}

impl FileCatalog {
    pub fn new(mut files: Vec<FileReference>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files }
    }

    /// Enumerate the files matching `pattern` under `data_directory`.
    pub fn discover(data_directory: &Path, pattern: &str) -> Result<Self> {
        let full_pattern = data_directory.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let mut files = Vec::new();
        for entry in glob(&full_pattern).context("Failed to read glob pattern")? {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        debug!("Found measurement file {}", path.display());
                        files.push(FileReference::new(path));
                    }
                }
                Err(e) => warn!("Error reading path: {}", e),
            }
        }

        info!(
            "Found {} measurement file(s) matching '{}'",
            files.len(),
            full_pattern
        );
        Ok(Self::new(files))
    }

    pub fn files(&self) -> &[FileReference] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn default_file(&self) -> Option<&FileReference> {
        self.files.first()
    }

    /// Find a file by name. Only files of the catalog can be loaded.
    pub fn resolve(&self, name: &str) -> Result<&FileReference, DashboardError> {
        self.files
            .iter()
            .find(|file| file.name == name)
            .ok_or_else(|| DashboardError::NotFound {
                reference: name.to_string(),
            })
    }
}
