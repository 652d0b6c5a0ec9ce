// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::stats::{nan_max, nan_median, nan_min, nan_percentile, nan_std, pct_true};
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

/// Finite values sprinkled with NaN and infinities.
fn noisy_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            8 => -1.0e4f64..1.0e4,
            1 => Just(f64::NAN),
            1 => Just(f64::INFINITY),
        ],
        0..64,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn percentiles_are_bounded_and_monotone(values in noisy_values(), a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let finite = values.iter().any(|v| v.is_finite());
        let (lo_q, hi_q) = if a <= b { (a, b) } else { (b, a) };
        let lo = nan_percentile(&values, lo_q);
        let hi = nan_percentile(&values, hi_q);
        prop_assert_eq!(lo.is_some(), finite);
        if let (Some(lo), Some(hi), Some(min), Some(max)) =
            (lo, hi, nan_min(&values), nan_max(&values))
        {
            prop_assert!(lo <= hi + 1e-9);
            prop_assert!(min <= lo + 1e-9 && hi <= max + 1e-9);
            prop_assert_eq!(nan_percentile(&values, 0.0), Some(min));
            prop_assert_eq!(nan_percentile(&values, 100.0), Some(max));
        }
    }

    #[test]
    fn median_and_std_ignore_non_finite(values in noisy_values()) {
        let finite = values.iter().copied().filter(|v| v.is_finite()).collect::<Vec<_>>();
        prop_assert_eq!(nan_median(&values), nan_median(&finite));
        prop_assert_eq!(nan_std(&values), nan_std(&finite));
        if let Some(std) = nan_std(&values) {
            prop_assert!(std >= 0.0);
        }
    }

    #[test]
    fn pct_true_is_a_percentage(flags in prop::collection::vec(any::<bool>(), 0..128)) {
        let pct = pct_true(flags.iter().copied());
        prop_assert!((0.0..=100.0).contains(&pct));
        let hits = flags.iter().filter(|f| **f).count();
        if flags.is_empty() {
            prop_assert_eq!(pct, 0.0);
        } else {
            prop_assert!((pct - hits as f64 * 100.0 / flags.len() as f64).abs() < 1e-9);
        }
    }
}
