use crate::config::ChartOptions;
use crate::core::StreamResult;
use super::spec::{BinEdges, ChartLayout, ChartSpec, HistogramSeries};

pub const JITTER_CHART_TITLE: &str = "Inter-sample interval distribution";

/// Builds the overlaid density histogram, one series per stream
pub fn jitter_distribution_chart(results: &[StreamResult], options: &ChartOptions) -> ChartSpec {
    let bins = options.histogram_bins;

    let series = results
        .iter()
        .map(|result| {
            if !result.intervals_ms.is_empty() && in_range_count(&result.intervals_ms, &bins) == 0 {
                log::warn!(
                    "No intervals of stream {} fall inside the histogram range [{}, {}) ms",
                    result.name(),
                    bins.start,
                    bins.end
                );
            }
            HistogramSeries {
                stream_name: result.name().to_string(),
                opacity: options.series_opacity,
                densities: densities(&result.intervals_ms, &bins),
            }
        })
        .collect();

    ChartSpec {
        title: JITTER_CHART_TITLE.to_string(),
        width: options.histogram_width,
        height: options.histogram_height,
        layout: ChartLayout::Histogram { bins, series },
    }
}

/// Number of `values` that land in some bin
pub fn in_range_count(values: &[f64], bins: &BinEdges) -> usize {
    values.iter().filter(|&&value| bins.index_of(value).is_some()).count()
}

/// Per-bin density of `values`: count / (total * bin width)
///
/// Values outside the bin range still count toward the total, so a series
/// with outliers integrates to less than one over the visible range.
pub fn densities(values: &[f64], bins: &BinEdges) -> Vec<f64> {
    let mut counts = vec![0usize; bins.count()];
    for &value in values {
        if let Some(index) = bins.index_of(value) {
            counts[index] += 1;
        }
    }

    if values.is_empty() {
        return vec![0.0; counts.len()];
    }

    let scale = values.len() as f64 * bins.width;
    counts.into_iter().map(|c| c as f64 / scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_densities_integrate_to_one_inside_range() {
        let bins = BinEdges { start: 0.0, end: 4.0, width: 0.5 };
        let values = [1.0, 1.1, 2.0, 3.9];
        let total: f64 = densities(&values, &bins).iter().map(|d| d * bins.width).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_outliers_reduce_visible_mass() {
        let bins = BinEdges { start: 0.0, end: 1.0, width: 1.0 };
        assert_eq!(densities(&[0.5, 7.0], &bins), vec![0.5]);
    }

    #[test]
    fn test_slow_stream_misses_default_bins() {
        let bins = BinEdges::default();
        assert_eq!(in_range_count(&[1000.0, 1000.0], &bins), 0);
        assert_eq!(in_range_count(&[15.6, 49.9, 50.0], &bins), 2);
    }

    #[test]
    fn test_empty_values() {
        let bins = BinEdges { start: 0.0, end: 2.0, width: 1.0 };
        assert_eq!(densities(&[], &bins), vec![0.0, 0.0]);
    }
}
