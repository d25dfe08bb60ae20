//! Report persistence.
//!
//! The suite persists at most one object per run: the structured rendering,
//! under `<region>/<mode>/<date>.json`. [`BlobStore`] is the seam; cloud
//! backends live outside this crate, while [`DirStore`] maps the bucket/key
//! namespace onto a local directory tree for self-hosted setups and tests.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::cli::Mode;
use crate::error::Result;

/// Destination for persisted reports. Invoked at most once per run.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, body: &[u8], media_type: &str) -> Result<()>;
}

/// Derives the canonical report key, `<region>/<mode>/<date>.json`, where the
/// date is the date part of the run's ISO-8601 timestamp.
pub fn report_key(region: &str, mode: Mode, time: &str) -> String {
    let date = time.split('T').next().unwrap_or(time);
    format!("{region}/{mode}/{date}.json")
}

/// Blob store backed by a local directory: `<root>/<bucket>/<key>`.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for DirStore {
    async fn put(&self, bucket: &str, key: &str, body: &[u8], _media_type: &str) -> Result<()> {
        let path = self.root.join(bucket).join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, body).await?;
        debug!("wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_key_uses_date_part() {
        let key = report_key("sea", Mode::Text, "2024-05-01T12:34:56.789");
        assert_eq!(key, "sea/text/2024-05-01.json");
    }

    #[test]
    fn test_report_key_modes() {
        assert_eq!(report_key("local", Mode::Image, "2024-05-01T00:00:00"), "local/image/2024-05-01.json");
        assert_eq!(report_key("local", Mode::Video, "2024-05-01T00:00:00"), "local/video/2024-05-01.json");
    }

    #[tokio::test]
    async fn test_dir_store_writes_bucket_key_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());

        store
            .put("results", "sea/text/2024-05-01.json", b"{}", "application/json")
            .await
            .unwrap();

        let path = dir.path().join("results/sea/text/2024-05-01.json");
        assert_eq!(std::fs::read(path).unwrap(), b"{}");
    }
}
