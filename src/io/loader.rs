use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::core::Recording;
use super::RecordingLoader;

/// Loads a recording that has already been decoded to JSON
///
/// The document carries `streams` (with flattened metadata, `data` and
/// `timestamps`) and optional `path` and `events`.
#[derive(Debug, Clone, Default)]
pub struct JsonRecordingLoader;

impl JsonRecordingLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordingLoader for JsonRecordingLoader {
    async fn load(&self, path: &Path) -> Result<Recording> {
        let json = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read recording from {:?}", path))?;

        let mut recording: Recording = serde_json::from_str(&json)
            .with_context(|| format!("Failed to decode recording {:?}", path))?;

        if recording.path.is_empty() {
            recording.path = path.display().to_string();
        }

        log::debug!("Loaded {} streams from {:?}", recording.streams.len(), path);
        Ok(recording)
    }
}
