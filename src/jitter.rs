//! Inter-sample interval computation
//!
//! Turns each stream's timestamps into a sequence of intervals in
//! milliseconds. Validation runs over the whole recording before anything is
//! computed, so a single error names every stream that is too short.

use crate::core::{Stream, StreamResult};
use crate::error::{InsufficientSamplesError, InsufficientStream};

/// Fewest sample frames that still yield one interval
pub const MIN_SAMPLES: usize = 2;

/// Raw first differences of `timestamps`, scaled from seconds to milliseconds
pub fn intervals_ms(timestamps: &[f64]) -> Vec<f64> {
    timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) * 1000.0)
        .collect()
}

/// Interval expected between samples at `rate_hz`, if the rate is usable
pub fn ideal_interval_ms(rate_hz: f64) -> Option<f64> {
    if rate_hz.is_finite() && rate_hz > 0.0 {
        Some(1000.0 / rate_hz)
    } else {
        None
    }
}

/// Number of intervals a window of `window_seconds` allows at `rate_hz`
///
/// Irregular streams (rate of zero or less) are not capped.
pub fn window_cap(window_seconds: f64, rate_hz: f64) -> Option<usize> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        return None;
    }
    Some((window_seconds * rate_hz).floor().max(0.0) as usize)
}

/// Checks every stream against the two-sample minimum
///
/// A sample only counts when it has both a frame and a timestamp, so a
/// stream whose timestamps run short of its data is judged by the shorter.
pub fn validate_streams(streams: &[Stream]) -> Result<(), InsufficientSamplesError> {
    let invalid: Vec<InsufficientStream> = streams
        .iter()
        .filter(|s| s.usable_sample_count() < MIN_SAMPLES)
        .map(|s| InsufficientStream {
            name: s.name().to_string(),
            sample_count: s.usable_sample_count(),
        })
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(InsufficientSamplesError { streams: invalid })
    }
}

#[derive(Debug, Clone, Default)]
pub struct JitterCalculator {
    window_seconds: Option<f64>,
    sample_rate_override_hz: Option<f64>,
}

impl JitterCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap retained intervals to what `seconds` holds at the nominal rate
    pub fn with_window(mut self, seconds: Option<f64>) -> Self {
        self.window_seconds = seconds;
        self
    }

    /// Use `rate_hz` instead of each stream's declared rate
    pub fn with_sample_rate_override(mut self, rate_hz: Option<f64>) -> Self {
        self.sample_rate_override_hz = rate_hz;
        self
    }

    /// Rate used for the window cap and the ideal interval of a stream declaring `nominal_rate_hz`
    pub fn effective_rate_hz(&self, nominal_rate_hz: f64) -> f64 {
        self.sample_rate_override_hz.unwrap_or(nominal_rate_hz)
    }

    /// Validates all streams, then computes one result per stream in input order
    pub fn calculate(&self, streams: &[Stream]) -> Result<Vec<StreamResult>, InsufficientSamplesError> {
        validate_streams(streams)?;
        Ok(streams.iter().map(|s| self.calculate_stream(s)).collect())
    }

    fn calculate_stream(&self, stream: &Stream) -> StreamResult {
        let mut intervals = intervals_ms(&stream.timestamps);

        let cap = self.window_seconds.and_then(|window| {
            window_cap(window, self.effective_rate_hz(stream.metadata.nominal_sample_rate_hz))
        });
        if let Some(cap) = cap {
            if intervals.len() > cap {
                log::debug!(
                    "Windowing stream {}: keeping {} of {} intervals",
                    stream.name(),
                    cap,
                    intervals.len()
                );
                intervals.truncate(cap);
            }
        }

        let retained = (intervals.len() + 1).min(stream.timestamps.len());

        StreamResult {
            metadata: stream.metadata.clone(),
            intervals_ms: intervals,
            timestamps: stream.timestamps[..retained].to_vec(),
        }
    }
}
