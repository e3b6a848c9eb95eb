use serde::{Deserialize, Serialize};

/// Declarative description of a chart, handed to a `ChartRenderer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mark", rename_all = "camelCase")]
pub enum ChartLayout {
    /// One row per stream sharing a time axis
    #[serde(rename_all = "camelCase")]
    FacetedLine { time_axis: TimeAxis, rows: Vec<FacetRow> },

    /// Overlaid density series over fixed bins
    #[serde(rename_all = "camelCase")]
    Histogram { bins: BinEdges, series: Vec<HistogramSeries> },
}

/// How the x coordinate of an interval point is derived from its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeAxis {
    /// Seconds since the first retained timestamp of the stream
    #[default]
    Elapsed,
    /// Timestamps as recorded
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    #[default]
    StepAfter,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetRow {
    pub stream_name: String,
    /// Reference line; absent for irregular streams
    pub ideal_interval_ms: Option<f64>,
    pub interpolation: Interpolation,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub time_s: f64,
    pub interval_ms: f64,
}

/// Fixed histogram bins: [start, end) split into `width`-sized buckets
///
/// The default [0, 50) ms range covers streams of 20 Hz and faster. Slower
/// streams need a wider range through `histogramBins` or their series stays
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    pub start: f64,
    pub end: f64,
    pub width: f64,
}

impl BinEdges {
    pub fn count(&self) -> usize {
        ((self.end - self.start) / self.width).ceil().max(0.0) as usize
    }

    /// Lower edge of bin `index`
    pub fn lower(&self, index: usize) -> f64 {
        self.start + index as f64 * self.width
    }

    /// Bin holding `value`, if it falls inside [start, end)
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if !(value >= self.start && value < self.end) {
            return None;
        }
        let index = ((value - self.start) / self.width).floor() as usize;
        (index < self.count()).then_some(index)
    }
}

impl Default for BinEdges {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 50.0,
            width: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramSeries {
    pub stream_name: String,
    pub opacity: f64,
    /// Per-bin density, normalized so the full distribution integrates to 1
    pub densities: Vec<f64>,
}
