use crate::config::ChartOptions;
use crate::core::StreamResult;
use crate::jitter::ideal_interval_ms;
use super::spec::{ChartLayout, ChartPoint, ChartSpec, FacetRow, Interpolation, TimeAxis};

pub const INTERVALS_CHART_TITLE: &str = "Inter-sample intervals over time";

/// Builds the faceted interval-over-time chart, one row per stream in input order
///
/// Point `i` of a row sits at the timestamp that opens interval `i`, so with
/// step-after interpolation each interval is drawn across the span it covers.
/// `rate_for` maps a result to the rate its reference line is drawn at.
pub fn intervals_over_time_chart(
    results: &[StreamResult],
    options: &ChartOptions,
    time_axis: TimeAxis,
    rate_for: impl Fn(&StreamResult) -> f64,
) -> ChartSpec {
    let rows: Vec<FacetRow> = results
        .iter()
        .map(|result| FacetRow {
            stream_name: result.name().to_string(),
            ideal_interval_ms: ideal_interval_ms(rate_for(result)),
            interpolation: Interpolation::StepAfter,
            points: interval_points(result, time_axis),
        })
        .collect();

    let row_count = u32::try_from(rows.len().max(1)).unwrap_or(u32::MAX);
    let height = options.facet_row_height.saturating_mul(row_count);

    ChartSpec {
        title: INTERVALS_CHART_TITLE.to_string(),
        width: options.facet_width,
        height,
        layout: ChartLayout::FacetedLine { time_axis, rows },
    }
}

fn interval_points(result: &StreamResult, time_axis: TimeAxis) -> Vec<ChartPoint> {
    let origin = match time_axis {
        TimeAxis::Elapsed => result.timestamps.first().copied().unwrap_or(0.0),
        TimeAxis::Raw => 0.0,
    };

    result
        .timestamps
        .iter()
        .zip(&result.intervals_ms)
        .map(|(&t, &interval_ms)| ChartPoint {
            time_s: t - origin,
            interval_ms,
        })
        .collect()
}
