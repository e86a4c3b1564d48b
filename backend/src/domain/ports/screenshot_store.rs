//! Port for screenshot blob storage.

use async_trait::async_trait;

/// Errors raised by screenshot store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenshotStoreError {
    /// The blob could not be written.
    #[error("screenshot write failed: {message}")]
    Write {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl ScreenshotStoreError {
    /// Build a [`ScreenshotStoreError::Write`] error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Port for persisting decoded screenshot payloads.
///
/// Implementations return the public URL under which the stored blob can be
/// fetched; that URL replaces the inline data-URL before the record insert.
#[async_trait]
pub trait ScreenshotStore: Send + Sync {
    /// Persist image bytes under a fresh name with the given extension and
    /// return the stored URL.
    async fn store(&self, extension: &str, bytes: &[u8])
        -> Result<String, ScreenshotStoreError>;
}

/// Fixture store that discards bytes and returns a canned URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScreenshotStore;

#[async_trait]
impl ScreenshotStore for FixtureScreenshotStore {
    async fn store(
        &self,
        extension: &str,
        _bytes: &[u8],
    ) -> Result<String, ScreenshotStoreError> {
        Ok(format!("/screenshots/fixture.{extension}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_store_returns_a_url_with_the_extension() {
        let store = FixtureScreenshotStore;
        let url = store.store("png", b"bytes").await.expect("fixture store succeeds");
        assert_eq!(url, "/screenshots/fixture.png");
    }
}
