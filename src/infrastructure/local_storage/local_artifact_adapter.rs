//! Infrastructure adapter for writing export artifacts to local storage.

use crate::domain::entities::ImpdpDetails;
use crate::domain::errors::{ExportError, Result};
use crate::ports::artifact_port::ArtifactPort;
use log::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Concrete implementation of `ArtifactPort` for the local filesystem.
#[derive(Debug, Default)]
pub struct LocalArtifactAdapter;

impl LocalArtifactAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Helper to write string content to a file at the specified path.
    fn write_file(&self, path: &Path, content: &str) -> std::io::Result<()> {
        let mut f = File::create(path)?;
        f.write_all(content.as_bytes())?;
        f.write_all(b"\n")?;
        Ok(())
    }
}

impl ArtifactPort for LocalArtifactAdapter {
    fn write_impdp_details(&self, details: &ImpdpDetails, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(details)
            .map_err(|e| ExportError::ArtifactError(e.to_string()))?;
        self.write_file(path, &body).map_err(ExportError::IoError)?;
        info!("Wrote impdp details to {}", path.display());
        Ok(())
    }

    fn prepare_log_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            info!("Creating log directory {}", dir.display());
        }
        fs::create_dir_all(dir)?;
        Ok(())
    }
}
