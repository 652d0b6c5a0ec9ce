// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::stats::{nan_median, nan_percentile, nan_std};
use logtool_core::{Evidence, Field, Finding, FindingCode, Severity, TableSlice};

const TRIM_WARN_PCT: f64 = 10.0;
const TRIM_FAIL_PCT: f64 = 20.0;
const AFR_STD_LIMIT: f64 = 0.6;

fn abs_p90(values: &[f64]) -> Option<f64> {
    let abs = values.iter().map(|v| v.abs()).collect::<Vec<_>>();
    nan_percentile(&abs, 90.0)
}

pub(crate) fn evaluate_trims(slice: &TableSlice<'_>) -> Option<Vec<Finding>> {
    let [stft, ltft] = slice.columns([Field::StftPct, Field::LtftPct])?;
    let st_med = nan_median(stft)?;
    let lt_med = nan_median(ltft)?;
    let st_p90 = abs_p90(stft)?;
    let lt_p90 = abs_p90(ltft)?;

    let worst = st_p90.max(lt_p90);
    let severity = if worst > TRIM_FAIL_PCT {
        Severity::Fail
    } else if worst > TRIM_WARN_PCT {
        Severity::Warn
    } else {
        Severity::Info
    };
    Some(vec![Finding::new(
        FindingCode::TrimsCruise,
        severity,
        format!(
            "STFT median {st_med:.1}% (|p90| {st_p90:.1}%), LTFT median {lt_med:.1}% (|p90| {lt_p90:.1}%). High trims suggest intake/evap leaks, MAF scaling, or injector scaling."
        ),
        Evidence::new()
            .with("stft_median", st_med)
            .with("stft_abs_p90", st_p90)
            .with("ltft_median", lt_med)
            .with("ltft_abs_p90", lt_p90),
    )])
}

pub(crate) fn evaluate_afr_variability(slice: &TableSlice<'_>) -> Option<Vec<Finding>> {
    let afr = slice.column(Field::AfrActual)?;
    let afr_std = nan_std(afr)?;
    if afr_std <= AFR_STD_LIMIT {
        return Some(Vec::new());
    }
    Some(vec![Finding::new(
        FindingCode::AfrCruiseVar,
        Severity::Info,
        format!(
            "AFR standard deviation {afr_std:.2}. Large variability can occur with transients; verify the segment is truly steady."
        ),
        Evidence::new().with("afr_std", afr_std),
    )])
}
