use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::spec::{BinEdges, ChartLayout, ChartPoint, ChartSpec, FacetRow, HistogramSeries};

/// Turns a declarative chart description into PNG bytes
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render_png(&self, chart: &ChartSpec) -> Result<Vec<u8>>;
}

const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

const REFERENCE_COLOR: RGBColor = RGBColor(220, 20, 60);

/// Rasterizes charts in memory with plotters and encodes them as PNG
///
/// Only shapes are drawn; the chart carries no text so no font backend is
/// needed.
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChartRenderer for PlottersRenderer {
    async fn render_png(&self, chart: &ChartSpec) -> Result<Vec<u8>> {
        let chart = chart.clone();
        tokio::task::spawn_blocking(move || rasterize(&chart))
            .await
            .context("Chart rasterization task failed")?
    }
}

/// Pixel budget of one rasterized chart (RGB, so three bytes each)
pub const MAX_CHART_PIXELS: u64 = 1 << 26;

fn draw_error(err: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("Failed to draw chart: {}", err)
}

fn rasterize(chart: &ChartSpec) -> Result<Vec<u8>> {
    let (width, height) = (chart.width, chart.height);
    if width == 0 || height == 0 {
        return Err(anyhow!("Cannot render a {}x{} chart", width, height));
    }
    let area = u64::from(width) * u64::from(height);
    if area > MAX_CHART_PIXELS {
        return Err(anyhow!(
            "Cannot render a {}x{} chart: more than {} pixels",
            width,
            height,
            MAX_CHART_PIXELS
        ));
    }

    let mut pixels = vec![0u8; area as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        match &chart.layout {
            ChartLayout::FacetedLine { rows, .. } => draw_facets(&root, rows)?,
            ChartLayout::Histogram { bins, series } => draw_histogram(&root, bins, series)?,
        }

        root.present().map_err(draw_error)?;
    }

    encode_png(&pixels, width, height)
}

/// Pads a degenerate range so the coordinate mapping stays finite
fn padded(min: f64, max: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    if max - min < f64::EPSILON {
        let pad = if min.abs() > 1.0 { min.abs() * 0.05 } else { 0.5 };
        return (min - pad, max + pad);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Expands points into a step-after polyline
fn step_after(points: &[ChartPoint], x_end: f64) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(points.len() * 2);
    for (i, point) in points.iter().enumerate() {
        let next_x = points.get(i + 1).map(|p| p.time_s).unwrap_or(x_end);
        path.push((point.time_s, point.interval_ms));
        path.push((next_x, point.interval_ms));
    }
    path
}

fn draw_facets(root: &DrawingArea<BitMapBackend<'_>, Shift>, rows: &[FacetRow]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    // Shared time axis across every facet
    let (x_min, x_max) = padded_bounds(rows.iter().flat_map(|r| r.points.iter().map(|p| p.time_s)));
    let areas = root.split_evenly((rows.len(), 1));

    for (index, (area, row)) in areas.iter().zip(rows).enumerate() {
        let values = row.points.iter().map(|p| p.interval_ms).chain(row.ideal_interval_ms);
        let (y_min, y_max) = padded_bounds(values);

        let mut chart = ChartBuilder::on(area)
            .margin(12)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_error)?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x_min, y_min), (x_max, y_max)],
                BLACK.mix(0.3).stroke_width(1),
            )))
            .map_err(draw_error)?;

        if let Some(ideal) = row.ideal_interval_ms {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x_min, ideal), (x_max, ideal)],
                    REFERENCE_COLOR.stroke_width(2),
                )))
                .map_err(draw_error)?;
        }

        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        let x_end = row.points.last().map(|p| p.time_s).unwrap_or(x_max);
        chart
            .draw_series(LineSeries::new(step_after(&row.points, x_end), color.stroke_width(1)))
            .map_err(draw_error)?;
    }

    Ok(())
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = bounds(values);
    padded(lo, hi)
}

fn draw_histogram(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    bins: &BinEdges,
    series: &[HistogramSeries],
) -> Result<()> {
    let peak = series
        .iter()
        .flat_map(|s| s.densities.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .build_cartesian_2d(bins.start..bins.end, 0.0..y_max)
        .map_err(draw_error)?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(bins.start, 0.0), (bins.end, y_max)],
            BLACK.mix(0.3).stroke_width(1),
        )))
        .map_err(draw_error)?;

    for (index, s) in series.iter().enumerate() {
        let style = SERIES_COLORS[index % SERIES_COLORS.len()].mix(s.opacity).filled();
        let bars = s.densities.iter().enumerate().filter(|(_, d)| **d > 0.0).map(|(bin, &d)| {
            let lower = bins.lower(bin);
            let upper = (lower + bins.width).min(bins.end);
            Rectangle::new([(lower, 0.0), (upper, d)], style)
        });
        chart.draw_series(bars).map_err(draw_error)?;
    }

    Ok(())
}

fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().context("Failed to write PNG header")?;
        writer.write_image_data(pixels).context("Failed to encode PNG image data")?;
    }
    Ok(out)
}
