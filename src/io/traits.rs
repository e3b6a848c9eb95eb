use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::Recording;

/// Decodes a recording file into memory
#[async_trait]
pub trait RecordingLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<Recording>;
}

/// Persists a finished artifact
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}
