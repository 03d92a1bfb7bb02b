//! Upload persistence.
//!
//! Uploads are written flat into a single directory under their sanitized name. An upload with
//! the same name replaces the earlier file. Files are never deleted, so the directory grows
//! without bound.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::types::StorageError;

/// Directory-backed store for uploaded documents.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `root`. The directory is not touched until [`Self::ensure_exists`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory uploads are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory (and parents) if missing.
    pub fn ensure_exists(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root).map_err(|source| StorageError::CreateDir {
            path: self.root.clone(),
            source,
        })
    }

    /// Write `bytes` under `filename`, which must already be sanitized.
    pub async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            sha256 = %hex::encode(Sha256::digest(bytes)),
            "Stored upload"
        );
        Ok(path)
    }
}
