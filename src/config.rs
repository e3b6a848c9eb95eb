//! Options for a grapher run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::charts::{BinEdges, TimeAxis};
use crate::error::GrapherError;

/// Narrowest facet row that keeps axis labels from colliding
pub const MIN_FACET_WIDTH: u32 = 800;

/// Largest width or height a configured chart dimension may take
pub const MAX_CHART_DIMENSION: u32 = 16_384;

/// What the results document carries next to the echoed paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportMode {
    /// Full interval sequences under `streamResults`
    #[default]
    Jitter,
    /// Stream metadata only, under `streams`
    Metadata,
}

/// Sizes and binning of the rendered charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    pub facet_width: u32,
    pub facet_row_height: u32,
    pub histogram_width: u32,
    pub histogram_height: u32,
    pub histogram_bins: BinEdges,
    pub series_opacity: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            facet_width: 1000,
            facet_row_height: 250,
            histogram_width: 1000,
            histogram_height: 600,
            histogram_bins: BinEdges::default(),
            series_opacity: 0.5,
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<(), GrapherError> {
        if self.facet_width < MIN_FACET_WIDTH {
            return Err(GrapherError::InvalidConfig(format!(
                "facetWidth must be at least {} px, got {}",
                MIN_FACET_WIDTH, self.facet_width
            )));
        }
        if self.facet_row_height == 0 || self.histogram_width == 0 || self.histogram_height == 0 {
            return Err(GrapherError::InvalidConfig("chart dimensions must be positive".to_string()));
        }
        let largest = self
            .facet_width
            .max(self.facet_row_height)
            .max(self.histogram_width)
            .max(self.histogram_height);
        if largest > MAX_CHART_DIMENSION {
            return Err(GrapherError::InvalidConfig(format!(
                "chart dimensions must not exceed {} px, got {}",
                MAX_CHART_DIMENSION, largest
            )));
        }

        let bins = &self.histogram_bins;
        if !(bins.width.is_finite() && bins.width > 0.0) {
            return Err(GrapherError::InvalidConfig(format!(
                "histogram bin width must be positive, got {}",
                bins.width
            )));
        }
        if !(bins.start.is_finite() && bins.end.is_finite() && bins.end > bins.start) {
            return Err(GrapherError::InvalidConfig(format!(
                "histogram bin range [{}, {}) is empty",
                bins.start, bins.end
            )));
        }
        if !(self.series_opacity > 0.0 && self.series_opacity <= 1.0) {
            return Err(GrapherError::InvalidConfig(format!(
                "series opacity must be in (0, 1], got {}",
                self.series_opacity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrapherOptions {
    pub xdf_input_path: PathBuf,
    pub output_dir: PathBuf,

    /// Overrides every stream's nominal rate when set
    #[serde(default)]
    pub sample_rate_hz: Option<f64>,

    /// Maximum observation duration in seconds
    #[serde(default)]
    pub window_seconds: Option<f64>,

    #[serde(default)]
    pub report_mode: ReportMode,

    #[serde(default)]
    pub time_axis: TimeAxis,

    #[serde(default)]
    pub charts: ChartOptions,
}

impl GrapherOptions {
    pub fn new(xdf_input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            xdf_input_path: xdf_input_path.into(),
            output_dir: output_dir.into(),
            sample_rate_hz: None,
            window_seconds: None,
            report_mode: ReportMode::default(),
            time_axis: TimeAxis::default(),
            charts: ChartOptions::default(),
        }
    }

    /// Parse options from a JSON object, filling defaults for missing keys
    pub fn from_json(config: Value) -> Result<Self> {
        let options: Self = serde_json::from_value(config).context("Failed to parse grapher options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_sample_rate_hz(mut self, rate_hz: f64) -> Self {
        self.sample_rate_hz = Some(rate_hz);
        self
    }

    pub fn with_window_seconds(mut self, seconds: f64) -> Self {
        self.window_seconds = Some(seconds);
        self
    }

    pub fn with_report_mode(mut self, mode: ReportMode) -> Self {
        self.report_mode = mode;
        self
    }

    pub fn with_time_axis(mut self, axis: TimeAxis) -> Self {
        self.time_axis = axis;
        self
    }

    pub fn with_charts(mut self, charts: ChartOptions) -> Self {
        self.charts = charts;
        self
    }

    pub fn validate(&self) -> Result<(), GrapherError> {
        if let Some(rate) = self.sample_rate_hz {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(GrapherError::InvalidConfig(format!(
                    "sampleRateHz must be positive, got {}",
                    rate
                )));
            }
        }
        if let Some(window) = self.window_seconds {
            if !(window.is_finite() && window > 0.0) {
                return Err(GrapherError::InvalidConfig(format!(
                    "windowSeconds must be positive, got {}",
                    window
                )));
            }
        }
        self.charts.validate()
    }

    pub fn results_json_path(&self) -> PathBuf {
        self.artifact_path("results.json")
    }

    pub fn intervals_chart_path(&self) -> PathBuf {
        self.artifact_path("intervals_over_time.png")
    }

    pub fn jitter_chart_path(&self) -> PathBuf {
        self.artifact_path("jitter.png")
    }

    fn artifact_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
