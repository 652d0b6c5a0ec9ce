// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::WotContext;
use logtool_core::stats::{difference, nan_max, nan_mean, nan_min, nan_percentile, pct_true};
use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TableSlice};

const UNDERBOOST_P90_PSI: f64 = 2.0;
const UNDERBOOST_FAIL_P90_PSI: f64 = 4.0;
const PROTECT_MARGIN_PSI: f64 = 0.8;
const PROTECT_HUG_PSI: f64 = 0.7;
const PROTECT_MIN_PCT: f64 = 5.0;

/// Boost error (`target - actual`) summary over one segment.
#[derive(Clone, Debug, PartialEq)]
pub struct BoostStats {
    pub max_target: f64,
    pub max_actual: f64,
    pub mean_err: f64,
    pub p90_err: f64,
    pub p10_err: f64,
    pub osc_rate: f64,
}

impl BoostStats {
    pub fn from_slice(slice: &TableSlice<'_>) -> Option<Self> {
        let [target, actual] = slice.columns([Field::BoostTargetPsi, Field::BoostActualPsi])?;
        let err = difference(target, actual);
        Some(Self {
            max_target: nan_max(target)?,
            max_actual: nan_max(actual)?,
            mean_err: nan_mean(&err)?,
            p90_err: nan_percentile(&err, 90.0)?,
            p10_err: nan_percentile(&err, 10.0)?,
            osc_rate: oscillation_rate(&err),
        })
    }

    pub fn is_underboost(&self) -> bool {
        self.p90_err > UNDERBOOST_P90_PSI
    }
}

fn sign(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fraction of consecutive first-difference pairs whose sign differs.
///
/// The first difference is taken against the first sample itself, so it is
/// always zero. A NaN difference never matches its neighbour.
pub fn oscillation_rate(err: &[f64]) -> f64 {
    let Some(&first) = err.first() else {
        return 0.0;
    };
    let signs = std::iter::once(first - first)
        .chain(err.windows(2).map(|w| w[1] - w[0]))
        .map(sign)
        .collect::<Vec<_>>();
    let changes = signs.windows(2).filter(|w| w[0] != w[1]).count();
    changes as f64 / err.len().saturating_sub(1).max(1) as f64
}

pub(crate) fn evaluate_tracking(_slice: &TableSlice<'_>, ctx: &WotContext) -> Option<Vec<Finding>> {
    let stats = ctx.boost()?;
    let evidence = Evidence::new()
        .with("max_target", stats.max_target)
        .with("max_actual", stats.max_actual)
        .with("p90_err", stats.p90_err)
        .with("p10_err", stats.p10_err)
        .with("mean_err", stats.mean_err)
        .with("osc_rate", stats.osc_rate);

    let finding = if stats.is_underboost() {
        let severity = if stats.p90_err < UNDERBOOST_FAIL_P90_PSI {
            Severity::Warn
        } else {
            Severity::Fail
        };
        let polarity = ctx.polarity();
        Finding::new(
            FindingCode::Underboost,
            severity,
            format!(
                "Peak target {:.1} psi, peak actual {:.1} psi. Boost error p90 {:.1} psi (mean {:.1}). WG polarity guess: {}. Oscillation rate {:.2}.",
                stats.max_target,
                stats.max_actual,
                stats.p90_err,
                stats.mean_err,
                polarity,
                stats.osc_rate
            ),
            evidence.with("wg_polarity", polarity.as_str()),
        )
    } else {
        Finding::new(
            FindingCode::BoostOk,
            Severity::Info,
            format!(
                "Peak target {:.1} psi, peak actual {:.1} psi. Boost error p90 {:.1} psi.",
                stats.max_target, stats.max_actual, stats.p90_err
            ),
            evidence,
        )
    };
    Some(vec![finding])
}

pub(crate) fn evaluate_protection(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let [protect, target, actual] = slice.columns([
        Field::TurboCompProtectPsi,
        Field::BoostTargetPsi,
        Field::BoostActualPsi,
    ])?;

    let limiting = protect
        .iter()
        .zip(target)
        .map(|(p, t)| *p < t - PROTECT_MARGIN_PSI)
        .collect::<Vec<_>>();
    let pct_limited = pct_true(limiting.iter().copied());
    if pct_limited <= PROTECT_MIN_PCT {
        return Some(Vec::new());
    }

    let pct_hugging = pct_true(
        actual
            .iter()
            .zip(protect)
            .zip(&limiting)
            .map(|((a, p), lim)| *lim && (a - p).abs() <= PROTECT_HUG_PSI),
    );
    Some(vec![Finding::new(
        FindingCode::CompProtect,
        Severity::Warn,
        format!(
            "Protection ceiling was >0.8 psi below target for {pct_limited:.1}% of pull; actual boost was within 0.7 psi of ceiling for {pct_hugging:.1}% of those points."
        ),
        Evidence::new()
            .with("pct_limited", pct_limited)
            .with("pct_hugging_ceiling", pct_hugging)
            .with("protect_min", nan_min(protect))
            .with("target_max", nan_max(target)),
    )])
}
