//! Gauge chart rendering for prediction reports.
//!
//! Draws the 0-150 axis as three fixed color bands with the predicted band's
//! midpoint marked by a black threshold bar, and writes the result as a PNG.

use crate::types::report::{ScoreBand, ScoreReport, GAUGE_AXIS_MAX};
use anyhow::{anyhow, Result};
use plotters::prelude::*;
use std::path::Path;

const BAND_COLORS: [RGBColor; 3] = [
    RGBColor(0xff, 0x4d, 0x4d), // Poor
    RGBColor(0xff, 0xa5, 0x00), // Standard
    RGBColor(0x32, 0xcd, 0x32), // Good
];

const WIDTH: u32 = 640;
const HEIGHT: u32 = 260;

/// Render the gauge for a report into a PNG file
pub fn render<P: AsRef<Path>>(report: &ScoreReport, path: P) -> Result<()> {
    draw(report, path.as_ref())
        .map_err(|e| anyhow!("Failed to render gauge chart: {}", e))
}

fn draw(report: &ScoreReport, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Credit Score", ("sans-serif", 28))
        .margin(16)
        .build_cartesian_2d(0f64..GAUGE_AXIS_MAX, 0f64..1f64)?;

    // Three fixed color steps across the axis.
    chart.draw_series(ScoreBand::ALL.iter().map(|band| {
        let (start, end) = band.gauge_range();
        Rectangle::new(
            [(start, 0.35), (end, 0.75)],
            BAND_COLORS[band.code()].filled(),
        )
    }))?;

    // Band tick labels at the midpoints.
    chart.draw_series(ScoreBand::ALL.iter().map(|band| {
        Text::new(
            band.label(),
            (band.gauge_position() - 10.0, 0.22),
            ("sans-serif", 18),
        )
    }))?;

    // Threshold marker at the predicted position.
    let position = report.gauge_position;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(position - 1.0, 0.25), (position + 1.0, 0.85)],
        BLACK.filled(),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("{:.0}", position),
        (position - 6.0, 0.92),
        ("sans-serif", 20),
    )))?;

    root.present()?;
    Ok(())
}
