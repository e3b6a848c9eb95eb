use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::ArtifactWriter;

/// Writes artifacts straight to the filesystem
///
/// Parent directories are not created; writing into a missing directory fails.
#[derive(Debug, Clone, Default)]
pub struct FsArtifactWriter;

impl FsArtifactWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactWriter for FsArtifactWriter {
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {:?}", path))?;

        log::info!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }
}
