use serde::{Deserialize, Serialize};

/// Descriptive fields of a stream, as echoed into the results document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamMetadata {
    pub id: u32,
    pub name: String,

    #[serde(rename = "type")]
    pub stream_type: String,

    pub channel_count: u32,

    /// Sample encoding tag, e.g. "float32"
    pub channel_format: String,

    /// Declared sampling rate; 0 marks an irregular stream
    pub nominal_sample_rate_hz: f64,
}

/// One channel group of a recording with its samples and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    #[serde(flatten)]
    pub metadata: StreamMetadata,

    /// Sample frames, one inner vector of channel values per frame
    #[serde(default)]
    pub data: Vec<Vec<f64>>,

    /// Seconds, one per sample frame
    #[serde(default)]
    pub timestamps: Vec<f64>,
}

impl Stream {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Number of sample frames in the stream
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Samples that have both a frame and a timestamp
    pub fn usable_sample_count(&self) -> usize {
        self.data.len().min(self.timestamps.len())
    }
}

/// Marker or annotation recorded alongside the streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: f64,
    pub value: String,
}

/// Decoded recording handed over by a loader
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub path: String,

    pub streams: Vec<Stream>,

    #[serde(default)]
    pub events: Vec<Event>,
}

impl Recording {
    pub fn new(path: impl Into<String>, streams: Vec<Stream>) -> Self {
        Self {
            path: path.into(),
            streams,
            events: Vec::new(),
        }
    }

    pub fn stream_metadata(&self) -> Vec<StreamMetadata> {
        self.streams.iter().map(|s| s.metadata.clone()).collect()
    }
}
