use serde::{Deserialize, Serialize};
use super::StreamMetadata;

/// Inter-sample intervals computed for a single stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResult {
    #[serde(flatten)]
    pub metadata: StreamMetadata,

    /// intervals_ms[i] = (timestamps[i + 1] - timestamps[i]) * 1000
    pub intervals_ms: Vec<f64>,

    /// Timestamps backing the retained intervals (one more than intervals_ms)
    #[serde(skip)]
    pub timestamps: Vec<f64>,
}

impl StreamResult {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
