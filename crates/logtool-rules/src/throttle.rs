// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::WotContext;
use logtool_core::stats::{nan_min, pct_true};
use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TableSlice};

const PEDAL_WOT_PCT: f64 = 95.0;
const THROTTLE_CLOSED_PCT: f64 = 90.0;
const CLOSURE_MIN_PCT: f64 = 2.0;

pub(crate) fn evaluate(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let [pedal, throttle] = slice.columns([Field::AppPct, Field::ThrottlePct])?;
    let closure_pct = pct_true(
        pedal
            .iter()
            .zip(throttle)
            .map(|(p, t)| *p >= PEDAL_WOT_PCT && *t < THROTTLE_CLOSED_PCT),
    );
    let thr_min = nan_min(throttle)?;
    let evidence = Evidence::new()
        .with("closure_pct", closure_pct)
        .with("thr_min", thr_min);

    let finding = if closure_pct > CLOSURE_MIN_PCT {
        Finding::new(
            FindingCode::ThrottleClosure,
            Severity::Warn,
            format!(
                "Throttle <90% for {closure_pct:.1}% of the pull while pedal >=95% (min throttle {thr_min:.1}%). Often indicates torque/traction/thermal limiting."
            ),
            evidence,
        )
    } else {
        Finding::new(
            FindingCode::ThrottleOk,
            Severity::Info,
            format!(
                "Throttle <90% for {closure_pct:.1}% of the pull while pedal >=95% (min throttle {thr_min:.1}%)."
            ),
            evidence,
        )
    };
    Some(vec![finding])
}
