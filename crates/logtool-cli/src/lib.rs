// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod export;
pub mod plot;
pub mod render;

use config::CliConfig;
use error::CliError;
use logtool_core::{RunDiagnostics, TelemetryTable};
use logtool_doctor::{SegmentReport, detect_segments, make_reports};
use logtool_ingest::{basic_cleanup, load_log, map_columns};
use std::path::Path;

/// Everything one run produces before rendering.
#[derive(Clone, Debug)]
pub struct LogAnalysis {
    pub table: TelemetryTable,
    pub diagnostics: RunDiagnostics,
    pub reports: Vec<SegmentReport>,
}

/// Loads, maps, cleans and analyzes the log at `path`.
///
/// An empty `reports` list means no segment qualified.
pub fn analyze_log(path: &Path, config: &CliConfig) -> Result<LogAnalysis, CliError> {
    config.analysis.validate()?;
    let raw = load_log(path)?;
    let mapped = map_columns(&raw, &config.header_mapping());
    let cleaned = basic_cleanup(&mapped)?;
    let table = cleaned.table;

    let mut diagnostics = RunDiagnostics::for_table(&table);
    diagnostics.missing_headers = mapped.missing;
    diagnostics.rows_dropped = cleaned.rows_dropped;

    let segments = detect_segments(&table, &config.analysis)?;
    for segment in &segments {
        diagnostics.record_segment(segment.kind);
    }
    let reports = if segments.is_empty() {
        diagnostics.notes.push("no segments detected".to_string());
        Vec::new()
    } else {
        make_reports(&table, &segments)?
    };

    Ok(LogAnalysis {
        table,
        diagnostics,
        reports,
    })
}
