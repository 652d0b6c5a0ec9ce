// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! PNG rendering of exported plot series. Time-indexed series are drawn as
//! lines; anything else is drawn as a scatter.

use crate::error::CliError;
use crate::export::PlotSeries;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const PLOT_SIZE: (u32, u32) = (1000, 500);
const MARGIN_PX: u32 = 20;

fn span(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return None;
    }
    if lo == hi {
        return Some(lo - 1.0..hi + 1.0);
    }
    Some(lo..hi)
}

fn finite_points(series: &PlotSeries, column: usize) -> Vec<(f64, f64)> {
    series
        .rows
        .iter()
        .filter_map(|row| Some((*row.first()?, *row.get(column)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/// Renders `series` to `path` as a PNG.
///
/// Returns `Ok(false)` without touching the filesystem when the series has no
/// finite point to draw.
pub fn render_png(series: &PlotSeries, path: &Path) -> Result<bool, CliError> {
    let curves = (1..series.columns.len())
        .map(|column| finite_points(series, column))
        .collect::<Vec<_>>();
    let x = span(curves.iter().flatten().map(|(x, _)| *x));
    let y = span(curves.iter().flatten().map(|(_, y)| *y));
    let (Some(x), Some(y)) = (x, y) else {
        log::debug!("skipping {}: nothing finite to draw", series.name);
        return Ok(false);
    };
    let scatter = series.columns.first() != Some(&"time_s");

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|err| CliError::plot(path, err))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(MARGIN_PX)
        .build_cartesian_2d(x, y)
        .map_err(|err| CliError::plot(path, err))?;

    for (idx, points) in curves.into_iter().enumerate() {
        let color = Palette99::pick(idx);
        if scatter {
            chart
                .draw_series(points.into_iter().map(|p| Circle::new(p, 2, color.filled())))
                .map_err(|err| CliError::plot(path, err))?;
        } else {
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(|err| CliError::plot(path, err))?;
        }
    }
    root.present().map_err(|err| CliError::plot(path, err))?;
    Ok(true)
}
