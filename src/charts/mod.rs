pub mod histogram;
pub mod intervals;
pub mod renderer;
pub mod spec;

pub use histogram::{in_range_count, jitter_distribution_chart};
pub use intervals::intervals_over_time_chart;
pub use renderer::{ChartRenderer, PlottersRenderer};
pub use spec::{
    BinEdges, ChartLayout, ChartPoint, ChartSpec, FacetRow, HistogramSeries, Interpolation, TimeAxis,
};
