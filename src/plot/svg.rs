//! Plotters-powered standard curve chart, written to an SVG file.
//!
//! Observed standards are drawn as dots, the regression line as a solid line
//! across the standard range. Title and axis labels come from the chart data.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::domain::StandardCurveChart;
use crate::error::AppError;

/// Render `chart` to an SVG file at `path`.
pub fn write_chart_svg(path: &Path, chart: &StandardCurveChart, width: u32, height: u32) -> Result<(), AppError> {
    draw_chart(path, chart, (width.max(200), height.max(150))).map_err(|e| {
        AppError::new(2, format!("Failed to render chart SVG '{}': {e}", path.display()))
    })?;
    log::info!("Wrote chart to '{}'", path.display());
    Ok(())
}

fn draw_chart(path: &Path, data: &StandardCurveChart, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let (x0, x1) = padded_bounds(data.x.iter().copied());
    let (y0, y1) = padded_bounds(data.observed.iter().chain(&data.fitted).copied());

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&data.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(data.x_label.as_str())
        .y_desc(data.y_label.as_str())
        .x_labels(6)
        .y_labels(6)
        .draw()?;

    let mut line = data.fitted_points();
    line.sort_by(|a, b| a.0.total_cmp(&b.0));
    chart.draw_series(LineSeries::new(line, &BLACK))?;

    chart.draw_series(
        data.observed_points()
            .into_iter()
            .map(|p| Circle::new(p, 3, BLACK.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Min/max of `values` widened by 5% on each side (or ±1 for a degenerate range).
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    if max <= min {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
