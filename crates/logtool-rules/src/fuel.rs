// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::WotContext;
use logtool_core::stats::{difference, nan_max, nan_mean, nan_min, nan_percentile, pct_true};
use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TableSlice};

const FRP_WARN_SHORTFALL_PSI: f64 = 300.0;
const FRP_FAIL_SHORTFALL_PSI: f64 = 600.0;
const SPILL_HIGH_MIN_PCT: f64 = 25.0;
const AFR_MEAN_ABS_LIMIT: f64 = 0.5;
const AFR_LEAN_P90_LIMIT: f64 = 0.8;

/// Fuel rail tracking plus HPFP spill context when the spill channel exists.
pub(crate) fn evaluate_rail(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let [actual, target] = slice.columns([Field::FrpActualPsi, Field::FrpTargetPsi])?;
    let shortfall = difference(target, actual);
    let max_drop = nan_max(&shortfall)?;
    let min_act = nan_min(actual)?;
    let evidence = Evidence::new()
        .with("max_shortfall_psi", max_drop)
        .with("min_frp_actual_psi", min_act);

    let mut findings = Vec::with_capacity(2);
    if max_drop > FRP_WARN_SHORTFALL_PSI {
        let severity = if max_drop < FRP_FAIL_SHORTFALL_PSI {
            Severity::Warn
        } else {
            Severity::Fail
        };
        findings.push(Finding::new(
            FindingCode::FrpDrop,
            severity,
            format!(
                "Max FRP shortfall {max_drop:.0} psi (min actual {min_act:.0} psi). Watch HPFP/LPFP capacity and commanded load."
            ),
            evidence,
        ));
    } else {
        findings.push(Finding::new(
            FindingCode::FrpOk,
            Severity::Info,
            format!("Max FRP shortfall {max_drop:.0} psi (min actual {min_act:.0} psi)."),
            evidence,
        ));
    }

    let spill = slice.column(Field::HpfpSpillFinal);
    if let Some((spill, spill_p95)) =
        spill.and_then(|spill| nan_percentile(spill, 95.0).map(|p95| (spill, p95)))
    {
        let pct_high = pct_true(spill.iter().map(|v| *v >= spill_p95));
        if max_drop > FRP_WARN_SHORTFALL_PSI && pct_high > SPILL_HIGH_MIN_PCT {
            findings.push(Finding::new(
                FindingCode::HpfpAtLimit,
                Severity::Warn,
                format!(
                    "HPFP Spill Final spent {pct_high:.1}% of pull near/above its p95 while FRP shortfall exceeded 300 psi. Suggests pump/supply capacity or commanded target too aggressive."
                ),
                Evidence::new()
                    .with("pct_spill_high", pct_high)
                    .with("spill_p95", spill_p95)
                    .with("max_frp_shortfall", max_drop),
            ));
        }
    }
    Some(findings)
}

pub(crate) fn evaluate_afr(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let [actual, commanded] = slice.columns([Field::AfrActual, Field::AfrCmd])?;
    let err = difference(actual, commanded);
    let abs_err = err.iter().map(|e| e.abs()).collect::<Vec<_>>();
    let mean_abs = nan_mean(&abs_err)?;
    let lean_p90 = nan_percentile(&err, 90.0)?;
    let evidence = Evidence::new()
        .with("mean_abs_afr_error", mean_abs)
        .with("lean_error_p90", lean_p90);

    let finding = if mean_abs > AFR_MEAN_ABS_LIMIT || lean_p90 > AFR_LEAN_P90_LIMIT {
        Finding::new(
            FindingCode::AfrMiss,
            Severity::Warn,
            format!(
                "Mean |AFR error| {mean_abs:.2}, lean error p90 {lean_p90:.2}. Check fuel pressure, injector calibration, and transient fueling."
            ),
            evidence,
        )
    } else {
        Finding::new(
            FindingCode::AfrOk,
            Severity::Info,
            format!("Mean |AFR error| {mean_abs:.2}, lean error p90 {lean_p90:.2}."),
            evidence,
        )
    };
    Some(vec![finding])
}
