// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! `logtool`: finds WOT pulls and cruise windows in an engine log and
//! explains what limited them.
//!
//! ```bash
//! logtool drive.csv
//! logtool drive.csv --include-cruise --json --plots --outdir out/
//! logtool drive.csv --config thresholds.json -vv
//! ```

use clap::{ArgAction, Parser};
use logtool_cli::analyze_log;
use logtool_cli::config::{CliConfig, load_config};
use logtool_cli::error::{CliError, error_envelope};
use logtool_cli::export::{
    REPORT_FILE_NAME, RunDocument, ensure_dir, write_json_output, write_plot_series,
};
use logtool_cli::render::{ConsoleReport, NO_SEGMENTS_MESSAGE, missing_columns_note};
use std::path::PathBuf;
use std::process;

/// Engine telemetry log analyzer
#[derive(Parser, Debug)]
#[command(name = "logtool")]
#[command(about = "Detect WOT pulls and cruise windows and rank likely causes of underperformance")]
#[command(version)]
struct Args {
    /// Path to the log (.csv, .xlsx or .xls)
    path: PathBuf,

    /// Also detect steady-cruise segments for fuel trim analysis
    #[arg(long)]
    include_cruise: bool,

    /// Write a machine-readable report to OUTDIR/report.json
    #[arg(long)]
    json: bool,

    /// Write per-segment plots (PNG) and their data (CSV) to OUTDIR
    #[arg(long)]
    plots: bool,

    /// Output directory for --json and --plots
    #[arg(long, default_value = "out")]
    outdir: PathBuf,

    /// JSON file with detector thresholds and extra header mappings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", error_envelope(&err));
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };
    config.analysis.include_cruise |= args.include_cruise;

    let analysis = analyze_log(&args.path, &config)?;
    if let Some(note) = missing_columns_note(&analysis.diagnostics.missing_headers) {
        println!("{note}");
    }
    if analysis.reports.is_empty() {
        println!("{NO_SEGMENTS_MESSAGE}");
        return Ok(());
    }

    print!("{}", ConsoleReport::new(&analysis.table, &analysis.reports));

    if args.plots || args.json {
        ensure_dir(&args.outdir)?;
    }
    if args.plots {
        write_plot_series(&analysis.table, &analysis.reports, &args.outdir)?;
        println!("\nPlots written to: {}/", args.outdir.display());
    }
    if args.json {
        let path = args.outdir.join(REPORT_FILE_NAME);
        let document = RunDocument::new(&analysis.diagnostics, &analysis.reports);
        write_json_output(&document, Some(&path))?;
        println!("JSON report written to: {}", path.display());
    }
    Ok(())
}
