use std::path::Path;
use tokio::fs;
use crate::utils::{BatchError, BatchResult};

/// Check if file exists
pub async fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Check if directory exists
pub async fn dir_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Create a directory and its parents if missing
pub async fn create_dir_all(path: impl AsRef<Path>) -> BatchResult<()> {
    let path = path.as_ref();
    fs::create_dir_all(path)
        .await
        .map_err(|e| BatchError::IO(format!("Failed to create {}: {}", path.display(), e)))
}

/// Final path component, for log messages
pub fn display_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_ref().display().to_string())
}
