// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::{SegmentKind, TelemetryTable};
use logtool_doctor::SegmentReport;
use std::fmt;

/// Ranked causes shown per WOT pull.
pub const CONSOLE_CAUSES: usize = 3;

/// Next steps shown under each printed cause.
pub const CONSOLE_NEXT_STEPS: usize = 3;

pub const NO_SEGMENTS_MESSAGE: &str =
    "No segments detected. Try lowering thresholds (--config) or verify app_pct/rpm logging.";

/// Lists mapped headers that the log did not contain.
pub fn missing_columns_note(missing: &[String]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let mut note = String::from("NOTE: Missing expected columns (ok if your monitor list differs):");
    for name in missing {
        note.push_str("\n  - ");
        note.push_str(name);
    }
    Some(note)
}

/// Human-readable report for every segment, numbered from 1.
pub struct ConsoleReport<'a> {
    table: &'a TelemetryTable,
    reports: &'a [SegmentReport],
}

impl<'a> ConsoleReport<'a> {
    pub fn new(table: &'a TelemetryTable, reports: &'a [SegmentReport]) -> Self {
        Self { table, reports }
    }

    fn value_at(values: &[f64], idx: usize) -> f64 {
        values.get(idx).copied().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.table.time();
        let rpm = self.table.rpm();
        for (i, report) in self.reports.iter().enumerate() {
            let segment = &report.segment;
            writeln!(
                f,
                "\n=== Segment {}: {}  idx[{}:{}]  time {:.2}-{:.2}s  rpm {:.0}-{:.0} ===",
                i + 1,
                segment.kind,
                segment.start_idx,
                segment.end_idx,
                Self::value_at(time, segment.start_idx),
                Self::value_at(time, segment.end_idx),
                Self::value_at(rpm, segment.start_idx),
                Self::value_at(rpm, segment.end_idx),
            )?;
            for finding in &report.findings {
                writeln!(
                    f,
                    "- [{}] {}: {}",
                    finding.severity.as_str().to_uppercase(),
                    finding.title,
                    finding.detail
                )?;
            }

            let causes = match (&segment.kind, &report.ranked_causes) {
                (SegmentKind::WotPull, Some(causes)) if !causes.is_empty() => causes,
                _ => continue,
            };
            writeln!(f, "\n  Likely causes (ranked) + next steps:")?;
            for (j, cause) in causes.iter().take(CONSOLE_CAUSES).enumerate() {
                writeln!(
                    f,
                    "  {}) {} (score {:.1}) - {}",
                    j + 1,
                    cause.cause,
                    cause.score,
                    cause.rationale
                )?;
                for step in cause.next_steps.iter().take(CONSOLE_NEXT_STEPS) {
                    writeln!(f, "     - {step}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CONSOLE_NEXT_STEPS, ConsoleReport, missing_columns_note};
    use logtool_core::{Evidence, Finding, FindingCode, Segment, SegmentKind, Severity, TelemetryTable};
    use logtool_doctor::{CauseCategory, RankedCause, SegmentReport};

    fn table() -> TelemetryTable {
        let time = (0..5).map(|i| f64::from(i) * 0.5).collect();
        let rpm = (0..5).map(|i| 3000.0 + f64::from(i) * 500.0).collect();
        TelemetryTable::new(time, rpm).expect("valid table")
    }

    fn cause(category: CauseCategory, score: f64) -> RankedCause {
        RankedCause {
            cause: category,
            score,
            rationale: "Underboost is present.".to_string(),
            next_steps: category.next_steps().iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn no_note_when_nothing_is_missing() {
        assert_eq!(missing_columns_note(&[]), None);
        let note = missing_columns_note(&["EMP (psi)".to_string()]).expect("note");
        assert!(note.ends_with("\n  - EMP (psi)"));
    }

    #[test]
    fn renders_header_findings_and_top_causes() {
        let table = table();
        let report = SegmentReport {
            segment: Segment::new(SegmentKind::WotPull, 1, 4).expect("segment"),
            findings: vec![Finding::new(
                FindingCode::Underboost,
                Severity::Fail,
                "Boost is 5.0 psi under target.",
                Evidence::new(),
            )],
            ranked_causes: Some(vec![
                cause(CauseCategory::WastegateMechanicalOrControlIssue, 5.0),
                cause(CauseCategory::BoostLeakPostTurbo, 3.5),
                cause(CauseCategory::PreTurbineExhaustLeak, 2.0),
                cause(CauseCategory::FuelingSystemLimit, 1.0),
            ]),
        };
        let reports = [report];
        let text = ConsoleReport::new(&table, &reports).to_string();

        assert!(text.contains("=== Segment 1: WOT_PULL  idx[1:4]  time 0.50-2.00s  rpm 3500-5000 ==="));
        assert!(text.contains("- [FAIL] "));
        assert!(text.contains("Likely causes (ranked) + next steps:"));
        assert!(text.contains("  1) wastegate_mechanical_or_control_issue (score 5.0) - Underboost is present."));
        assert!(text.contains("  3) pre_turbine_exhaust_leak (score 2.0)"));
        assert!(!text.contains("  4) "));
        assert_eq!(text.matches("     - ").count(), 9);
    }

    #[test]
    fn cruise_segments_print_findings_only() {
        let table = table();
        let reports = [SegmentReport {
            segment: Segment::new(SegmentKind::Cruise, 0, 4).expect("segment"),
            findings: vec![],
            ranked_causes: None,
        }];
        let text = ConsoleReport::new(&table, &reports).to_string();
        assert!(text.contains("Segment 1: CRUISE"));
        assert!(!text.contains("Likely causes"));
    }

    #[test]
    fn next_steps_are_capped_per_cause() {
        let table = table();
        let mut only = cause(CauseCategory::BoostLeakPostTurbo, 4.0);
        only.next_steps = (1..=5).map(|i| format!("step {i}")).collect();
        let reports = [SegmentReport {
            segment: Segment::new(SegmentKind::WotPull, 0, 4).expect("segment"),
            findings: vec![],
            ranked_causes: Some(vec![only]),
        }];
        let text = ConsoleReport::new(&table, &reports).to_string();
        assert_eq!(text.matches("     - ").count(), CONSOLE_NEXT_STEPS);
        assert!(text.contains("     - step 3"));
        assert!(!text.contains("     - step 4"));
    }
}
