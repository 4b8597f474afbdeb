// SPDX-License-Identifier: GPL-3.0-only

//! Photo library persistence
//!
//! Captured photos land in a temp file first; "save to library" moves them
//! into the pictures directory with a timestamped name. Discarding a
//! capture removes the temp file best-effort.

use crate::errors::StorageError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolve the photo library directory (`~/Pictures/<folder>`)
pub fn library_dir(folder_name: &str) -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            Path::new(&home).join("Pictures")
        })
        .join(folder_name)
}

/// Path for a fresh temporary capture file
pub fn temp_capture_path() -> PathBuf {
    std::env::temp_dir().join(format!("obscura-{}.jpg", uuid::Uuid::new_v4()))
}

/// Save a captured photo into the library.
///
/// Atomic from the caller's perspective: the photo is either fully present
/// under its library name or not at all (copy first, then remove the temp
/// file). Returns the library path on success.
pub async fn save_to_library(
    media_path: PathBuf,
    library: PathBuf,
) -> Result<PathBuf, StorageError> {
    tokio::fs::create_dir_all(&library)
        .await
        .map_err(|e| StorageError(format!("Cannot create library directory: {}", e)))?;

    let file_name = format!("photo_{}.jpg", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let target = library.join(file_name);

    tokio::fs::copy(&media_path, &target)
        .await
        .map_err(|e| StorageError(format!("Cannot copy photo into library: {}", e)))?;

    if let Err(error) = tokio::fs::remove_file(&media_path).await {
        // The library copy succeeded; a stale temp file is not a failure
        debug!(%error, path = %media_path.display(), "Temp capture not removed");
    }

    info!(path = %target.display(), "Photo saved to library");
    Ok(target)
}

/// Drop a capture without persisting it
pub fn discard(media_path: &Path) {
    match std::fs::remove_file(media_path) {
        Ok(()) => debug!(path = %media_path.display(), "Discarded capture"),
        Err(error) => {
            warn!(%error, path = %media_path.display(), "Could not remove discarded capture");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_moves_capture_into_library() {
        let dir = tempfile::tempdir().expect("tempdir");
        let capture = dir.path().join("capture.jpg");
        std::fs::write(&capture, b"jpeg-bytes").expect("write capture");
        let library = dir.path().join("library");

        let saved = save_to_library(capture.clone(), library.clone())
            .await
            .expect("save");

        assert!(saved.starts_with(&library));
        assert_eq!(std::fs::read(&saved).expect("read saved"), b"jpeg-bytes");
        assert!(!capture.exists(), "temp capture should be removed");
    }

    #[tokio::test]
    async fn test_save_missing_capture_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = save_to_library(
            dir.path().join("does-not-exist.jpg"),
            dir.path().join("library"),
        )
        .await;
        let error = result.expect_err("copying a missing capture must fail");
        assert!(error.to_string().contains("copy"));
    }

    #[test]
    fn test_discard_is_silent_on_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        discard(&dir.path().join("gone.jpg"));
    }

    #[test]
    fn test_temp_capture_paths_are_unique() {
        assert_ne!(temp_capture_path(), temp_capture_path());
    }
}
