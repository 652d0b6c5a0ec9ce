// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! File outputs of a run: the JSON report document and per-segment plot
//! series, written as CSV data next to a rendered PNG.

use crate::error::CliError;
use crate::plot::render_png;
use logtool_core::{Field, Finding, RunDiagnostics, Segment, TableSlice, TelemetryTable};
use logtool_doctor::{RankedCause, SegmentReport};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "report.json";

/// Minimum boosted samples before an EMP:boost ratio curve is exported.
const MIN_RATIO_POINTS: usize = 20;
const RATIO_MIN_BOOST_PSI: f64 = 2.0;

#[derive(Debug, Serialize)]
pub struct RunDocument<'a> {
    pub diagnostics: &'a RunDiagnostics,
    pub segments: Vec<SegmentEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SegmentEntry<'a> {
    pub segment: &'a Segment,
    pub findings: &'a [Finding],
    /// Empty for cruise segments.
    pub ranked_causes: &'a [RankedCause],
}

impl<'a> RunDocument<'a> {
    pub fn new(diagnostics: &'a RunDiagnostics, reports: &'a [SegmentReport]) -> Self {
        let segments = reports
            .iter()
            .map(|report| SegmentEntry {
                segment: &report.segment,
                findings: &report.findings,
                ranked_causes: report.ranked_causes.as_deref().unwrap_or(&[]),
            })
            .collect();
        Self {
            diagnostics,
            segments,
        }
    }
}

/// Writes `payload` as pretty JSON to `output_path`, or stdout when `None`.
pub fn write_json_output<T: Serialize>(
    payload: &T,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let encoded = serde_json::to_string_pretty(payload)
        .map_err(|source| CliError::json("failed to serialize JSON output", source))?;

    if let Some(path) = output_path {
        fs::write(path, format!("{encoded}\n"))
            .map_err(|source| CliError::io(format!("failed to write '{}'", path.display()), source))
    } else {
        println!("{encoded}");
        Ok(())
    }
}

pub fn ensure_dir(dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(dir)
        .map_err(|source| CliError::io(format!("failed to create '{}'", dir.display()), source))
}

/// One exportable overlay of a segment, in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<f64>>,
}

fn overlay(
    slice: &TableSlice<'_>,
    name: &'static str,
    columns: &'static [&'static str],
    fields: [Field; 2],
) -> Option<PlotSeries> {
    let first = slice.raw(fields[0])?;
    let second = slice.raw(fields[1])?;
    let rows = slice
        .time()
        .iter()
        .zip(first)
        .zip(second)
        .map(|((&t, &a), &b)| vec![t, a, b])
        .collect();
    Some(PlotSeries {
        name,
        columns,
        rows,
    })
}

fn emp_ratio_vs_rpm(slice: &TableSlice<'_>) -> Option<PlotSeries> {
    let emp = slice.raw(Field::EmpPsi)?;
    let boost = slice.raw(Field::BoostActualPsi)?;
    let rows = slice
        .rpm()
        .iter()
        .zip(emp)
        .zip(boost)
        .filter(|&((&rpm, &emp), &boost)| {
            boost > RATIO_MIN_BOOST_PSI && rpm.is_finite() && emp.is_finite() && boost.is_finite()
        })
        .map(|((&rpm, &emp), &boost)| vec![rpm, emp / boost])
        .collect::<Vec<_>>();
    if rows.len() <= MIN_RATIO_POINTS {
        return None;
    }
    Some(PlotSeries {
        name: "emp_ratio_vs_rpm",
        columns: &["rpm", "emp_boost_ratio"],
        rows,
    })
}

/// Overlays available for `slice`, skipping any whose channels are not logged.
pub fn plot_series(slice: &TableSlice<'_>) -> Vec<PlotSeries> {
    [
        overlay(
            slice,
            "boost",
            &["time_s", "boost_target_psi", "boost_actual_psi"],
            [Field::BoostTargetPsi, Field::BoostActualPsi],
        ),
        overlay(
            slice,
            "emp_boost",
            &["time_s", "emp_psi", "boost_actual_psi"],
            [Field::EmpPsi, Field::BoostActualPsi],
        ),
        emp_ratio_vs_rpm(slice),
        overlay(
            slice,
            "frp",
            &["time_s", "frp_target_psi", "frp_actual_psi"],
            [Field::FrpTargetPsi, Field::FrpActualPsi],
        ),
        overlay(
            slice,
            "throttle",
            &["time_s", "app_pct", "throttle_pct"],
            [Field::AppPct, Field::ThrottlePct],
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn write_series_csv(series: &PlotSeries, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", series.columns.join(","))?;
    for row in &series.rows {
        let cells = row
            .iter()
            .map(|v| if v.is_finite() { v.to_string() } else { String::new() })
            .collect::<Vec<_>>();
        writeln!(writer, "{}", cells.join(","))?;
    }
    writer.flush()
}

/// Writes `segment_{i}_{KIND}_{name}.csv` and the matching `.png` for every
/// report, numbered from 1. A series with nothing finite to draw gets no PNG.
pub fn write_plot_series(
    table: &TelemetryTable,
    reports: &[SegmentReport],
    outdir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    let mut written = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        let slice = table.slice(&report.segment)?;
        for series in plot_series(&slice) {
            let stem = format!("segment_{}_{}_{}", i + 1, report.segment.kind, series.name);
            let csv_path = outdir.join(format!("{stem}.csv"));
            write_series_csv(&series, &csv_path).map_err(|source| {
                CliError::io(format!("failed to write '{}'", csv_path.display()), source)
            })?;
            written.push(csv_path);

            let png_path = outdir.join(format!("{stem}.png"));
            if render_png(&series, &png_path)? {
                written.push(png_path);
            }
        }
    }
    log::info!("wrote {} plot file(s)", written.len());
    Ok(written)
}
