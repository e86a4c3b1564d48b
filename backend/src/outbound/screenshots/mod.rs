//! Filesystem-backed screenshot storage.
//!
//! Decoded screenshot bytes land in a public directory served as static
//! files; the stored URL is the path under that mount.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{ScreenshotStore, ScreenshotStoreError};

/// URL prefix under which the screenshot directory is served.
pub const PUBLIC_MOUNT: &str = "/screenshots";

/// Stores screenshots as files named by their upload timestamp in epoch
/// milliseconds, matching the URLs handed back to clients.
#[derive(Debug, Clone)]
pub struct FsScreenshotStore {
    directory: PathBuf,
}

impl FsScreenshotStore {
    /// Create a store rooted at `directory`. The directory is created on
    /// first write, not here.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl ScreenshotStore for FsScreenshotStore {
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, ScreenshotStoreError> {
        let filename = format!("{}.{extension}", Utc::now().timestamp_millis());
        let path = self.directory.join(&filename);

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|err| ScreenshotStoreError::write(err.to_string()))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| ScreenshotStoreError::write(err.to_string()))?;

        debug!(path = %path.display(), size = bytes.len(), "stored screenshot");
        Ok(format!("{PUBLIC_MOUNT}/{filename}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_and_returns_the_public_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsScreenshotStore::new(dir.path());

        let url = store.store("png", b"fake-png").await.expect("store");
        assert!(url.starts_with("/screenshots/"));
        assert!(url.ends_with(".png"));

        let filename = url.rsplit('/').next().expect("filename");
        let written = std::fs::read(dir.path().join(filename)).expect("read back");
        assert_eq!(written, b"fake-png");
    }

    #[tokio::test]
    async fn creates_the_directory_on_first_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("public").join("screenshots");
        let store = FsScreenshotStore::new(&nested);

        store.store("jpeg", b"bytes").await.expect("store");
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn unwritable_directory_reports_a_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file_in_the_way = dir.path().join("blocked");
        std::fs::write(&file_in_the_way, b"not a directory").expect("write file");
        let store = FsScreenshotStore::new(&file_in_the_way);

        let err = store.store("png", b"bytes").await.expect_err("must fail");
        assert!(matches!(err, ScreenshotStoreError::Write { .. }));
    }
}
