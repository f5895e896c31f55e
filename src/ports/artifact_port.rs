use crate::domain::entities::ImpdpDetails;
use crate::domain::errors::Result;
use std::path::Path;

/// Port for writing sidecar artifacts and preparing local output directories.
pub trait ArtifactPort: Send + Sync {
    /// Writes the impdp details JSON file to `path`, creating parent directories.
    fn write_impdp_details(&self, details: &ImpdpDetails, path: &Path) -> Result<()>;

    /// Makes sure the local log directory exists.
    fn prepare_log_dir(&self, dir: &Path) -> Result<()>;
}
