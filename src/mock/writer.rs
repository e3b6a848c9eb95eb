use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::io::ArtifactWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Writer that keeps every artifact in memory
#[derive(Clone, Default)]
pub struct MemoryWriter {
    writes: Arc<Mutex<Vec<WrittenArtifact>>>,
    fail_on: Arc<Mutex<Option<PathBuf>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes to `path` the way an unwritable file would
    pub async fn fail_on(&self, path: impl Into<PathBuf>) {
        *self.fail_on.lock().await = Some(path.into());
    }

    pub async fn writes(&self) -> Vec<WrittenArtifact> {
        self.writes.lock().await.clone()
    }

    pub async fn contents_of(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.writes
            .lock()
            .await
            .iter()
            .rev()
            .find(|w| w.path == path.as_ref())
            .map(|w| w.contents.clone())
    }
}

#[async_trait]
impl ArtifactWriter for MemoryWriter {
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.fail_on.lock().await.as_deref() == Some(path) {
            return Err(anyhow!("permission denied: {:?}", path));
        }

        self.writes.lock().await.push(WrittenArtifact {
            path: path.to_path_buf(),
            contents: contents.to_vec(),
        });
        Ok(())
    }
}
