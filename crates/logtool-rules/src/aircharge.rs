// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::WotContext;
use logtool_core::stats::{difference, nan_percentile, pct_true};
use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TableSlice};

const SHORTFALL_PCT_POINTS: f64 = 5.0;
const MISS_MIN_PCT: f64 = 30.0;

pub(crate) fn evaluate(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let [actual, desired] = slice.columns([Field::AirchargePct, Field::AirchargeDesPct])?;
    let diff = difference(desired, actual);
    let pct = pct_true(diff.iter().map(|d| *d > SHORTFALL_PCT_POINTS));
    if pct <= MISS_MIN_PCT {
        return Some(Vec::new());
    }
    Some(vec![Finding::new(
        FindingCode::AirchargeMiss,
        Severity::Warn,
        format!(
            "Air Charge Desired exceeded Actual by >5% for {pct:.1}% of pull. Can indicate airflow limitation or limiting strategy."
        ),
        Evidence::new()
            .with("pct_des_gt_act_5", pct)
            .with("diff_p90", nan_percentile(&diff, 90.0)),
    )])
}
