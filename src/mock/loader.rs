use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::Recording;
use crate::io::RecordingLoader;

/// Loader that hands out a canned recording and records each requested path
///
/// Clones share state, so a test can keep one handle and give another to
/// the grapher.
#[derive(Clone, Default)]
pub struct FakeRecordingLoader {
    response: Arc<Mutex<Option<Recording>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeRecordingLoader {
    pub fn new(recording: Recording) -> Self {
        Self {
            response: Arc::new(Mutex::new(Some(recording))),
            ..Self::default()
        }
    }

    pub async fn set_response(&self, recording: Recording) {
        *self.response.lock().await = Some(recording);
    }

    /// Make every following load fail with `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    pub async fn calls_to_load(&self) -> Vec<PathBuf> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl RecordingLoader for FakeRecordingLoader {
    async fn load(&self, path: &Path) -> Result<Recording> {
        self.calls.lock().await.push(path.to_path_buf());

        if let Some(message) = self.failure.lock().await.clone() {
            return Err(anyhow!(message));
        }

        self.response
            .lock()
            .await
            .clone()
            .ok_or_else(|| anyhow!("FakeRecordingLoader has no response for {:?}", path))
    }
}
