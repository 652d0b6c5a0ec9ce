// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TelemetryTable};
use logtool_doctor::{MAX_RANKED_CAUSES, MIN_RANKED_SCORE, rank_causes_wot, score_causes};
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

const CODES: [FindingCode; 12] = [
    FindingCode::Underboost,
    FindingCode::ThrottleClosure,
    FindingCode::ThrottleOk,
    FindingCode::CompProtect,
    FindingCode::FrpDrop,
    FindingCode::FrpOk,
    FindingCode::HpfpAtLimit,
    FindingCode::AfrMiss,
    FindingCode::AfrOk,
    FindingCode::WgSatClosed,
    FindingCode::WgPolarityUncertain,
    FindingCode::Knock,
];

fn findings_strategy() -> impl Strategy<Value = Vec<Finding>> {
    (
        prop::collection::vec(any::<bool>(), CODES.len()),
        prop::option::of(0.5f64..4.0),
    )
        .prop_map(|(mask, emp_ratio)| {
            let mut findings = CODES
                .iter()
                .zip(mask)
                .filter(|(_, keep)| *keep)
                .map(|(code, _)| Finding::new(*code, Severity::Warn, "", Evidence::new()))
                .collect::<Vec<_>>();
            if let Some(ratio) = emp_ratio {
                findings.push(Finding::new(
                    FindingCode::EmpRatio,
                    Severity::Info,
                    "",
                    Evidence::new().with("emp_boost_gauge_ratio_median", ratio),
                ));
            }
            findings
        })
}

fn pressure_table(drop: Option<f64>) -> TelemetryTable {
    let table = TelemetryTable::new(vec![0.0, 0.1, 0.2, 0.3], vec![3000.0, 3200.0, 3400.0, 3600.0])
        .expect("valid");
    match drop {
        Some(drop) => table
            .with_column(Field::PreThrottlePActPsi, vec![20.0 + drop; 4])
            .and_then(|t| t.with_column(Field::MapPsi, vec![20.0; 4]))
            .expect("valid"),
        None => table,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn scores_are_non_negative(
        findings in findings_strategy(),
        drop in prop::option::of(-5.0f64..5.0),
    ) {
        let table = pressure_table(drop);
        let scores = score_causes(&table.as_slice(), &findings);
        for (_, score) in scores {
            prop_assert!(score >= 0.0);
        }
    }

    #[test]
    fn ranking_is_bounded_filtered_and_sorted(
        findings in findings_strategy(),
        drop in prop::option::of(-5.0f64..5.0),
    ) {
        let table = pressure_table(drop);
        let ranked = rank_causes_wot(&table.as_slice(), &findings);
        prop_assert!(ranked.len() <= MAX_RANKED_CAUSES);
        for cause in &ranked {
            prop_assert!(cause.score >= MIN_RANKED_SCORE);
            prop_assert_eq!(cause.next_steps.len(), 3);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].cause < pair[1].cause);
            }
        }
    }

    #[test]
    fn ranking_is_idempotent(
        findings in findings_strategy(),
        drop in prop::option::of(-5.0f64..5.0),
    ) {
        let table = pressure_table(drop);
        let slice = table.as_slice();
        prop_assert_eq!(rank_causes_wot(&slice, &findings), rank_causes_wot(&slice, &findings));
    }
}
