// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::ranking::{RankedCause, rank_causes_wot};
use logtool_core::{Finding, LogError, Segment, SegmentKind, TelemetryTable};
use logtool_rules::{run_cruise_rules, run_wot_rules};
use logtool_segments::{
    CruiseDetector, CruiseDetectorConfig, SegmentDetector, WotDetectorConfig, WotPullDetector,
    merge_segments,
};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Detector thresholds and switches for one analysis run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisConfig {
    pub wot: WotDetectorConfig,
    pub cruise: CruiseDetectorConfig,
    /// Cruise detection is opt-in.
    pub include_cruise: bool,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), LogError> {
        self.wot.validate()?;
        self.cruise.validate()
    }
}

/// Findings and, for WOT pulls, ranked causes of one segment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentReport {
    pub segment: Segment,
    pub findings: Vec<Finding>,
    /// Present only for [`SegmentKind::WotPull`].
    pub ranked_causes: Option<Vec<RankedCause>>,
}

fn report_for(table: &TelemetryTable, segment: &Segment) -> Result<SegmentReport, LogError> {
    let slice = table.slice(segment)?;
    let report = match segment.kind {
        SegmentKind::WotPull => {
            let findings = run_wot_rules(&slice);
            let ranked = rank_causes_wot(&slice, &findings);
            SegmentReport {
                segment: *segment,
                findings,
                ranked_causes: Some(ranked),
            }
        }
        SegmentKind::Cruise => SegmentReport {
            segment: *segment,
            findings: run_cruise_rules(&slice),
            ranked_causes: None,
        },
    };
    Ok(report)
}

/// Builds one report per segment, in input order.
///
/// Fails only when a segment does not fit inside `table`.
pub fn make_reports(
    table: &TelemetryTable,
    segments: &[Segment],
) -> Result<Vec<SegmentReport>, LogError> {
    #[cfg(feature = "rayon")]
    let reports = segments
        .par_iter()
        .map(|segment| report_for(table, segment))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "rayon"))]
    let reports = segments
        .iter()
        .map(|segment| report_for(table, segment))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "built {} segment report(s) from {} samples",
        reports.len(),
        table.len()
    );
    Ok(reports)
}

/// Runs the configured detectors and merges their output by `start_idx`.
pub fn detect_segments(
    table: &TelemetryTable,
    config: &AnalysisConfig,
) -> Result<Vec<Segment>, LogError> {
    let mut detectors: Vec<Box<dyn SegmentDetector>> =
        vec![Box::new(WotPullDetector::new(config.wot.clone())?)];
    if config.include_cruise {
        detectors.push(Box::new(CruiseDetector::new(config.cruise.clone())?));
    }

    let segments = merge_segments(detectors.iter().map(|detector| {
        let found = detector.detect(table);
        log::info!("{} detector found {} segment(s)", detector.kind(), found.len());
        found
    }));
    Ok(segments)
}

/// Full pipeline: detect, evaluate rules, rank causes.
///
/// An empty result means no segment qualified; it is not an error.
pub fn analyze(
    table: &TelemetryTable,
    config: &AnalysisConfig,
) -> Result<Vec<SegmentReport>, LogError> {
    config.validate()?;
    let segments = detect_segments(table, config)?;
    if segments.is_empty() {
        log::info!("no segments detected in {} samples", table.len());
        return Ok(Vec::new());
    }
    make_reports(table, &segments)
}

#[cfg(test)]
mod tests {
    use super::{AnalysisConfig, analyze, make_reports};
    use logtool_core::{Field, Segment, SegmentKind, TelemetryTable};

    fn cruise_then_pull() -> TelemetryTable {
        // 15 samples of steady cruise at 1 Hz (0..14 s), then a 3 s pull at 10 Hz.
        let mut time = (0..15).map(f64::from).collect::<Vec<_>>();
        let mut rpm = vec![2200.0; 15];
        let mut app = vec![10.0; 15];
        let mut throttle = vec![15.0; 15];
        let mut stft = vec![12.0; 15];
        for i in 1..=30 {
            time.push(14.0 + f64::from(i) * 0.1);
            rpm.push(3000.0 + f64::from(i) * 100.0);
            app.push(100.0);
            throttle.push(95.0);
            stft.push(0.0);
        }
        let n = time.len();
        TelemetryTable::new(time, rpm)
            .and_then(|t| t.with_column(Field::AppPct, app))
            .and_then(|t| t.with_column(Field::ThrottlePct, throttle))
            .and_then(|t| t.with_column(Field::StftPct, stft))
            .and_then(|t| t.with_column(Field::LtftPct, vec![1.0; n]))
            .expect("valid table")
    }

    #[test]
    fn cruise_is_opt_in() {
        let table = cruise_then_pull();
        let reports = analyze(&table, &AnalysisConfig::default()).expect("analysis");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].segment.kind, SegmentKind::WotPull);
        assert!(reports[0].ranked_causes.is_some());

        let config = AnalysisConfig {
            include_cruise: true,
            ..AnalysisConfig::default()
        };
        let reports = analyze(&table, &config).expect("analysis");
        let kinds = reports.iter().map(|r| r.segment.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![SegmentKind::Cruise, SegmentKind::WotPull]);
        assert!(reports[0].ranked_causes.is_none());
        assert_eq!(reports[0].findings.len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let table = cruise_then_pull();
        let mut config = AnalysisConfig::default();
        config.wot.min_duration_s = f64::NAN;
        let err = analyze(&table, &config).expect_err("NaN duration");
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn out_of_range_segment_is_an_error() {
        let table = cruise_then_pull();
        let bad = Segment::new(SegmentKind::WotPull, 10, table.len()).expect("ordered");
        assert!(make_reports(&table, &[bad]).is_err());
    }

    #[test]
    fn empty_detection_is_not_an_error() {
        let table = TelemetryTable::new(vec![0.0, 1.0], vec![800.0, 800.0]).expect("valid");
        assert!(analyze(&table, &AnalysisConfig::default())
            .expect("analysis")
            .is_empty());
    }
}
