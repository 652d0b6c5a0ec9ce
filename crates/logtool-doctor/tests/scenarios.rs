// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::{Field, FindingCode, SegmentKind, Severity, TelemetryTable};
use logtool_doctor::{AnalysisConfig, CauseCategory, SegmentReport, analyze};

const N: usize = 31;

/// 3 s pull at 10 Hz, pedal pinned, rpm 3000 -> 6500 linearly.
fn base_pull() -> TelemetryTable {
    let time = (0..N).map(|i| i as f64 * 0.1).collect::<Vec<_>>();
    let rpm = (0..N)
        .map(|i| 3000.0 + 3500.0 * i as f64 / (N - 1) as f64)
        .collect::<Vec<_>>();
    TelemetryTable::new(time, rpm)
        .and_then(|t| t.with_column(Field::AppPct, vec![100.0; N]))
        .expect("valid base pull")
}

fn with(table: TelemetryTable, field: Field, values: Vec<f64>) -> TelemetryTable {
    table.with_column(field, values).expect("valid channel")
}

fn tracking_boost(table: TelemetryTable) -> TelemetryTable {
    let actual = (0..N)
        .map(|i| 19.5 + if i % 2 == 0 { 0.3 } else { -0.3 })
        .collect::<Vec<_>>();
    let table = with(table, Field::BoostTargetPsi, vec![20.0; N]);
    with(table, Field::BoostActualPsi, actual)
}

fn single_report(table: &TelemetryTable) -> SegmentReport {
    let mut reports = analyze(table, &AnalysisConfig::default()).expect("analysis runs");
    assert_eq!(reports.len(), 1, "expected exactly one segment");
    reports.remove(0)
}

fn codes(report: &SegmentReport) -> Vec<FindingCode> {
    report.findings.iter().map(|f| f.code).collect()
}

#[test]
fn scenario_a_healthy_pull() {
    let table = tracking_boost(with(base_pull(), Field::ThrottlePct, vec![95.0; N]));
    let report = single_report(&table);

    assert_eq!(report.segment.kind, SegmentKind::WotPull);
    assert_eq!(report.segment.start_idx, 1);
    assert_eq!(report.segment.end_idx, N - 1);
    let codes = codes(&report);
    assert!(codes.contains(&FindingCode::ThrottleOk));
    assert!(codes.contains(&FindingCode::BoostOk));
    assert!(!codes.contains(&FindingCode::Underboost));
    assert_eq!(report.ranked_causes, Some(Vec::new()));
}

#[test]
fn scenario_b_underboost_with_throttle_closure() {
    let table = with(base_pull(), Field::ThrottlePct, vec![60.0; N]);
    let table = with(table, Field::BoostTargetPsi, vec![20.0; N]);
    let table = with(table, Field::BoostActualPsi, vec![15.0; N]);
    let report = single_report(&table);

    let underboost = report
        .findings
        .iter()
        .find(|f| f.code == FindingCode::Underboost)
        .expect("underboost finding");
    assert_eq!(underboost.severity, Severity::Fail);
    assert!(codes(&report).contains(&FindingCode::ThrottleClosure));

    let ranked = report.ranked_causes.expect("wot pull is ranked");
    assert_eq!(ranked[0].cause, CauseCategory::TorqueOrTractionLimiting);
    assert!(ranked[0].score >= 4.5);
    assert!(ranked[0].rationale.starts_with("Underboost is present. Throttle closure detected."));
    assert_eq!(ranked[0].next_steps.len(), 3);
}

#[test]
fn scenario_c_high_emp_ratio() {
    let table = tracking_boost(with(base_pull(), Field::ThrottlePct, vec![95.0; N]));
    let emp = table
        .column(Field::BoostActualPsi)
        .expect("boost logged")
        .iter()
        .map(|b| 3.0 * b)
        .collect();
    let table = with(table, Field::EmpPsi, emp);
    let report = single_report(&table);

    let emp_ratio = report
        .findings
        .iter()
        .find(|f| f.code == FindingCode::EmpRatio)
        .expect("emp ratio finding");
    assert_eq!(emp_ratio.severity, Severity::Fail);

    let ranked = report.ranked_causes.expect("wot pull is ranked");
    let top_two = ranked.iter().take(2).map(|r| r.cause).collect::<Vec<_>>();
    assert!(top_two.contains(&CauseCategory::TurbineChokingOrExhaustRestriction));
    assert!(ranked[0].rationale.contains("EMP:Boost≈3.00."));
}

#[test]
fn table_without_pedal_yields_no_segments() {
    let time = (0..N).map(|i| i as f64 * 0.1).collect::<Vec<_>>();
    let rpm = (0..N).map(|i| 3000.0 + 100.0 * i as f64).collect::<Vec<_>>();
    let table = TelemetryTable::new(time, rpm).expect("valid");
    assert!(analyze(&table, &AnalysisConfig::default()).expect("analysis").is_empty());
}
