// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::{Field, SegmentKind, TelemetryTable};
use logtool_segments::{detect_steady_cruise, detect_wot_pulls, merge_segments};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

const MIN_PROPTEST_CASES: u32 = 256;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

/// Per-sample (dt, rpm step, pedal, throttle); pedal is biased toward the
/// extremes so both detectors see candidate runs.
fn sample_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (
        prop_oneof![Just(0.0), 0.01f64..0.5],
        -150.0f64..400.0,
        prop_oneof![0.0f64..25.0, 95.0f64..100.0],
        0.0f64..100.0,
    )
}

fn build_table(samples: &[(f64, f64, f64, f64)]) -> TelemetryTable {
    let mut time = Vec::with_capacity(samples.len());
    let mut rpm = Vec::with_capacity(samples.len());
    let mut app = Vec::with_capacity(samples.len());
    let mut throttle = Vec::with_capacity(samples.len());
    let (mut t, mut r) = (0.0, 2500.0);
    for &(dt, dr, pedal, thr) in samples {
        t += dt;
        r = (r + dr).clamp(700.0, 7500.0);
        time.push(t);
        rpm.push(r);
        app.push(pedal);
        throttle.push(thr);
    }
    TelemetryTable::new(time, rpm)
        .and_then(|table| table.with_column(Field::AppPct, app))
        .and_then(|table| table.with_column(Field::ThrottlePct, throttle))
        .expect("generated table should be valid")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn wot_segments_respect_bounds_and_filters(
        samples in prop::collection::vec(sample_strategy(), 1..300)
    ) {
        let table = build_table(&samples);
        let time = table.time();
        let rpm = table.rpm();
        for seg in detect_wot_pulls(&table, 95.0, 50.0, 1.5) {
            prop_assert_eq!(seg.kind, SegmentKind::WotPull);
            prop_assert!(seg.start_idx <= seg.end_idx);
            prop_assert!(seg.end_idx < table.len());
            prop_assert!(time[seg.end_idx] - time[seg.start_idx] >= 1.5);
            prop_assert!(rpm[seg.end_idx] - rpm[seg.start_idx] > 500.0);
        }
    }

    #[test]
    fn cruise_segments_respect_bounds(
        samples in prop::collection::vec(sample_strategy(), 1..300)
    ) {
        let table = build_table(&samples);
        let time = table.time();
        for seg in detect_steady_cruise(&table, 20.0, 40.0, 2.0, 5.0, 40.0) {
            prop_assert_eq!(seg.kind, SegmentKind::Cruise);
            prop_assert!(seg.start_idx <= seg.end_idx);
            prop_assert!(seg.end_idx < table.len());
            prop_assert!(time[seg.end_idx] - time[seg.start_idx] >= 2.0);
        }
    }

    #[test]
    fn same_kind_segments_never_overlap_and_merge_is_sorted(
        samples in prop::collection::vec(sample_strategy(), 1..300)
    ) {
        let table = build_table(&samples);
        let wot = detect_wot_pulls(&table, 95.0, 50.0, 0.2);
        let cruise = detect_steady_cruise(&table, 20.0, 40.0, 0.2, 5.0, 40.0);
        for list in [&wot, &cruise] {
            for pair in list.windows(2) {
                prop_assert!(pair[0].end_idx <= pair[1].start_idx);
            }
        }
        let merged = merge_segments([wot.clone(), cruise.clone()]);
        prop_assert_eq!(merged.len(), wot.len() + cruise.len());
        for pair in merged.windows(2) {
            prop_assert!(pair[0].start_idx <= pair[1].start_idx);
        }
    }

    #[test]
    fn detection_is_deterministic(
        samples in prop::collection::vec(sample_strategy(), 1..200)
    ) {
        let table = build_table(&samples);
        prop_assert_eq!(
            detect_wot_pulls(&table, 95.0, 50.0, 0.5),
            detect_wot_pulls(&table, 95.0, 50.0, 0.5)
        );
    }
}
