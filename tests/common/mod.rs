#![allow(dead_code)]

pub mod fixtures;
pub mod http;

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;
use tracegas::catalog::{FileCatalog, FileReference};

/// Temporary data directory filled with measurement files
pub struct TestData {
    pub dir: TempDir,
}

impl TestData {
    pub fn new(files: &[(&str, &str)]) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content)?;
        }
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog(&self) -> Result<FileCatalog> {
        FileCatalog::discover(self.path(), "*.csv")
    }

    pub fn file(&self, name: &str) -> FileReference {
        FileReference::new(self.path().join(name))
    }
}
