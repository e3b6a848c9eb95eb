//! Error types for a grapher run

use thiserror::Error;

/// A stream that holds too few sample frames to form an interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientStream {
    pub name: String,
    pub sample_count: usize,
}

/// Every stream of a recording that failed the two-sample minimum, in input order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Cannot calculate jitter with less than 2 samples! \n\nFound: {}.\n",
    describe_streams(.streams)
)]
pub struct InsufficientSamplesError {
    pub streams: Vec<InsufficientStream>,
}

fn describe_streams(streams: &[InsufficientStream]) -> String {
    streams
        .iter()
        .map(|s| format!("{} samples in stream {}", s.sample_count, s.name))
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Errors surfaced by `JitterGrapher::run`
///
/// Collaborator failures (load, write, render) are carried as-is so their
/// message reaches the caller unchanged.
#[derive(Error, Debug)]
pub enum GrapherError {
    #[error(transparent)]
    InsufficientSamples(#[from] InsufficientSamplesError),

    #[error(transparent)]
    Load(anyhow::Error),

    #[error(transparent)]
    Write(anyhow::Error),

    #[error(transparent)]
    Render(anyhow::Error),

    #[error("Failed to serialize results document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid grapher options: {0}")]
    InvalidConfig(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidState { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lists_every_stream_in_order() {
        let err = InsufficientSamplesError {
            streams: vec![
                InsufficientStream { name: "eeg".to_string(), sample_count: 1 },
                InsufficientStream { name: "ppg".to_string(), sample_count: 0 },
            ],
        };

        assert_eq!(
            err.to_string(),
            "Cannot calculate jitter with less than 2 samples! \n\nFound: 1 samples in stream eeg and 0 samples in stream ppg.\n"
        );
    }

    #[test]
    fn test_collaborator_errors_are_verbatim() {
        let err = GrapherError::Load(anyhow::anyhow!("no such file: a.xdf"));
        assert_eq!(err.to_string(), "no such file: a.xdf");
    }
}
