//! Plotters rendering for prepared chart data
//!
//! Every chart is drawn against a generic `DrawingBackend` so the same code
//! writes PNG (bitmap) and SVG output.

use super::spec::{ChartData, ChartSpec};
use crate::config::OutputFormat;
use crate::movies::error::Result;
use crate::movies::stats::HistogramBin;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";
const CAPTION_SIZE: f64 = 24.0;
const LABEL_SIZE: f64 = 15.0;
const MARGIN: u32 = 20;
const MARKER_RADIUS: u32 = 4;

/// Render `data` into `path` using the backend for `format`
pub fn render_chart(
    spec: &ChartSpec,
    data: &ChartData,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let size = (spec.size.width, spec.size.height);
    debug!(
        chart = spec.kind.key(),
        path = %path.display(),
        marks = data.len(),
        "rendering chart"
    );

    match format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, spec, data)?;
            root.present()?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, spec, data)?;
            root.present()?;
        }
    }
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    data: &ChartData,
) -> Result<()> {
    root.fill(&WHITE)?;

    match data {
        ChartData::Histogram {
            bins,
            density,
            color,
        } => draw_histogram(root, spec, bins, density.as_deref(), rgb(*color)),
        ChartData::HorizontalBars { bars, colors } => draw_horizontal_bars(root, spec, bars, colors),
        ChartData::Scatter { points, color } => draw_scatter(root, spec, points, rgb(*color)),
        ChartData::Line { points, color } => draw_line(root, spec, points, rgb(*color)),
    }
}

fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    bins: &[HistogramBin],
    density: Option<&[(f64, f64)]>,
    color: RGBColor,
) -> Result<()> {
    let x_range = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => first.start..last.end,
        _ => 0.0..1.0,
    };
    let max_count = bins.iter().map(|b| b.count as f64).fold(0.0, f64::max);
    let max_density = density
        .unwrap_or(&[])
        .iter()
        .map(|p| p.1)
        .fold(0.0, f64::max);
    let y_top = upper_bound(max_count.max(max_density));

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT, CAPTION_SIZE))
        .margin(MARGIN)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.5).filled())
    }))?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.stroke_width(1))
    }))?;

    if let Some(curve) = density {
        chart.draw_series(LineSeries::new(curve.iter().copied(), color.stroke_width(2)))?;
    }

    Ok(())
}

fn draw_horizontal_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    bars: &[(String, f64)],
    colors: &[[u8; 3]],
) -> Result<()> {
    let n = bars.len();
    let max_value = bars.iter().map(|b| b.1).fold(0.0, f64::max);
    let longest_label = bars.iter().map(|b| b.0.chars().count()).max().unwrap_or(0);
    let label_area = (longest_label as u32 * 8 + 30).clamp(80, 400);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT, CAPTION_SIZE))
        .margin(MARGIN)
        .x_label_area_size(45)
        .y_label_area_size(label_area)
        .build_cartesian_2d(0f64..upper_bound(max_value), (0..n.max(1)).into_segmented())?;

    // Bar i sits in band n-1-i so the first bar is drawn at the top
    let label_for = |value: &SegmentValue<usize>| -> String {
        match value {
            SegmentValue::CenterOf(band) if *band < n => bars[n - 1 - *band].0.clone(),
            _ => String::new(),
        }
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n.max(1))
        .y_label_formatter(&label_for)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
        let band = n - 1 - i;
        let fill = colors.get(i).copied().map(rgb).unwrap_or(BLUE);
        Rectangle::new(
            [
                (0.0, SegmentValue::Exact(band)),
                (*value, SegmentValue::Exact(band + 1)),
            ],
            fill.filled(),
        )
    }))?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    points: &[(f64, f64)],
    color: RGBColor,
) -> Result<()> {
    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT, CAPTION_SIZE))
        .margin(MARGIN)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, color.mix(0.7).filled())),
    )?;

    Ok(())
}

fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    points: &[(f64, f64)],
    color: RGBColor,
) -> Result<()> {
    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));
    let year_label = |x: &f64| format!("{:.0}", x);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT, CAPTION_SIZE))
        .margin(MARGIN)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_labels(points.len().clamp(2, 20))
        .x_label_formatter(&year_label)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, color.filled())),
    )?;

    Ok(())
}

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Top of a zero-based value axis with 5% headroom
fn upper_bound(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}

/// Data range padded by 5% on each side; unit range around a single value,
/// `0..1` when there is no data.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([3.0].into_iter()), 2.5..3.5);
        assert_eq!(padded_range([0.0, 10.0, f64::NAN].into_iter()), -0.5..10.5);
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(upper_bound(0.0), 1.0);
        assert_eq!(upper_bound(f64::NAN), 1.0);
        assert!((upper_bound(100.0) - 105.0).abs() < 1e-9);
    }
}
