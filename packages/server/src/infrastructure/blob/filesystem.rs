//! Stores hazard photos as files under the upload directory.
//!
//! Files are served back by the HTTP layer under `/uploads`.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlobError, BlobStore, HazardId};

/// Public path prefix under which stored files are reachable.
pub const UPLOADS_ROUTE: &str = "/uploads";

pub struct FileSystemBlobStore {
    root: PathBuf,
}

impl FileSystemBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl BlobStore for FileSystemBlobStore {
    async fn store(&self, hazard_id: &HazardId, bytes: Vec<u8>) -> Result<String, BlobError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let filename = format!("hazard_{}_{}.jpg", hazard_id, Uuid::new_v4().simple());
        tokio::fs::write(self.root.join(&filename), bytes).await?;

        tracing::debug!("Stored photo {} for hazard '{}'", filename, hazard_id);
        Ok(format!("{UPLOADS_ROUTE}/{filename}"))
    }
}
