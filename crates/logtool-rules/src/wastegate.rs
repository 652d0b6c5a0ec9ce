// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::{WgPolarity, WotContext};
use logtool_core::stats::{nan_max, nan_min, nan_percentile, pct_true};
use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TableSlice};

const HIGH_END_MIN_PCT: f64 = 30.0;

pub(crate) fn evaluate(slice: &TableSlice<'_>, ctx: &WotContext) -> Option<Vec<Finding>> {
    let wg = slice.column(Field::WgPosAct)?;
    let wg_min = nan_min(wg)?;
    let wg_max = nan_max(wg)?;
    let p5 = nan_percentile(wg, 5.0)?;
    let p95 = nan_percentile(wg, 95.0)?;
    let polarity = ctx.polarity();

    let mut findings = vec![Finding::new(
        FindingCode::WgRange,
        Severity::Info,
        format!(
            "WG pos p5={p5:.3}, p95={p95:.3} (min={wg_min:.3}, max={wg_max:.3}), polarity guess: {polarity}."
        ),
        Evidence::new()
            .with("wg_p5", p5)
            .with("wg_p95", p95)
            .with("wg_min", wg_min)
            .with("wg_max", wg_max)
            .with("wg_polarity", polarity.as_str()),
    )];

    if !ctx.underboost() {
        return Some(findings);
    }

    let pct_high = pct_true(wg.iter().map(|v| *v >= p95));
    if pct_high < HIGH_END_MIN_PCT {
        return Some(findings);
    }
    match polarity {
        WgPolarity::HigherMoreClosed => findings.push(Finding::new(
            FindingCode::WgSatClosed,
            Severity::Warn,
            format!(
                "During underboost, WG spent {pct_high:.1}% of pull at/above p95 (closed-like by inferred polarity). Suggests mechanical airflow limit (leak, turbine choking, turbo efficiency) rather than control."
            ),
            Evidence::new()
                .with("pct_closed_like", pct_high)
                .with("wg_p95", p95),
        )),
        WgPolarity::HigherMoreOpen => findings.push(Finding::new(
            FindingCode::WgPolarityUncertain,
            Severity::Info,
            format!(
                "WG spent {pct_high:.1}% near its high end while underboosting; confirm whether higher WG position means more open or more closed in your monitor definition."
            ),
            Evidence::new()
                .with("pct_high_end", pct_high)
                .with("wg_p95", p95)
                .with("wg_polarity", polarity.as_str()),
        )),
        WgPolarity::Unknown => {}
    }
    Some(findings)
}
