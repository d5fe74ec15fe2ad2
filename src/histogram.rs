use crate::error::{DigestError, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const BIN_COUNT: usize = 10;

/// Renders a PNG histogram of `values` titled after `column`.
pub fn render(path: &Path, column: &str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(DigestError::Plot("no values to plot".to_string()));
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Degenerate single-value columns still get one visible bar
    let span = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };
    let bin_width = span / BIN_COUNT as f64;

    let mut counts = [0u32; BIN_COUNT];
    for &value in values {
        let mut bin = ((value - min) / bin_width) as usize;
        if bin >= BIN_COUNT {
            bin = BIN_COUNT - 1;
        }
        counts[bin] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1);

    let root = BitMapBackend::new(path, (640, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Histogram of {}", column), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(min..(min + span), 0u32..(y_max + 1))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(column)
        .y_desc("Frequency")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(bin, &count)| {
            let x0 = min + bin_width * bin as f64;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0), (x1, count)], BLUE.mix(0.6).filled())
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!("Histogram saved to {}", path.display());
    Ok(())
}

fn plot_err(e: impl std::fmt::Display) -> DigestError {
    DigestError::Plot(e.to_string())
}
