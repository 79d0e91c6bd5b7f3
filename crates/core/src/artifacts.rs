//! Artifact store abstraction.
//!
//! Trained model binaries and other job outputs are persisted by path
//! reference. The reconciler only needs `exists` (to verify a reported
//! `result_ref` before accepting a completion) and `put` (used by tooling
//! and tests to stage artifacts).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::types::EntityId;

/// Errors from artifact store operations.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    /// The reference escapes the store or is otherwise malformed.
    #[error("Invalid artifact reference: {0}")]
    InvalidRef(String),

    /// Underlying filesystem failure.
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage backend for serialized model artifacts, keyed by opaque
/// path references.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Whether an artifact exists for the given reference.
    async fn exists(&self, artifact_ref: &str) -> Result<bool, ArtifactStoreError>;

    /// Persist raw bytes and return the reference they were stored under.
    async fn put(&self, bytes: &[u8]) -> Result<String, ArtifactStoreError>;
}

/// Filesystem-backed artifact store rooted at a base directory.
///
/// References are paths relative to `base_dir`. References containing
/// parent-directory components are rejected so a reference can never
/// resolve outside the store.
pub struct LocalArtifactStore {
    base_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a reference to an absolute path inside the store.
    fn resolve(&self, artifact_ref: &str) -> Result<PathBuf, ArtifactStoreError> {
        if artifact_ref.trim().is_empty() {
            return Err(ArtifactStoreError::InvalidRef(
                "reference must not be empty".into(),
            ));
        }
        let rel = Path::new(artifact_ref);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ArtifactStoreError::InvalidRef(artifact_ref.to_string()));
        }
        Ok(self.base_dir.join(rel))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn exists(&self, artifact_ref: &str) -> Result<bool, ArtifactStoreError> {
        let path = self.resolve(artifact_ref)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn put(&self, bytes: &[u8]) -> Result<String, ArtifactStoreError> {
        let artifact_ref = format!("{}.bin", EntityId::now_v7());
        let path = self.base_dir.join(&artifact_ref);
        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(artifact_ref = %artifact_ref, "Artifact stored");
        Ok(artifact_ref)
    }
}
