// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::WotContext;
use logtool_core::stats::nan_median;
use logtool_core::{Evidence, EvidenceValue, Field, Finding, FindingCode, Severity, TableSlice};

/// Boost below this is too close to zero to divide by.
const MIN_BOOST_PSI: f64 = 2.0;
const RATIO_WARN: f64 = 2.2;
const RATIO_FAIL: f64 = 2.5;
const RPM_TREND_DELTA_WARN: f64 = 0.6;
const MIN_BIN_SAMPLES: usize = 8;

/// Default RPM bin edges for [`emp_ratio_by_rpm`].
pub const EMP_RPM_BIN_EDGES: [u32; 10] = [2500, 3000, 3500, 4000, 4500, 5000, 5500, 6000, 6500, 7000];

/// Median exhaust-to-boost pressure ratios over samples with usable boost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmpBoostRatio {
    /// Gauge ratio `emp / boost`.
    pub gauge: f64,
    /// Absolute ratio `(emp + baro) / (boost + baro)`, when baro was logged.
    pub absolute: Option<f64>,
}

/// One populated RPM bin of the EMP:boost ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct EmpRpmBin {
    pub rpm_lo: u32,
    pub rpm_hi: u32,
    pub ratio_g_median: f64,
    pub ratio_abs_median: Option<f64>,
    pub n: usize,
}

impl EmpRpmBin {
    fn to_evidence(&self) -> EvidenceValue {
        Evidence::new()
            .with("rpm_lo", f64::from(self.rpm_lo))
            .with("rpm_hi", f64::from(self.rpm_hi))
            .with("ratio_g_median", self.ratio_g_median)
            .with("ratio_abs_median", self.ratio_abs_median)
            .with("n", self.n)
            .into()
    }
}

fn masked_ratios(
    emp: &[f64],
    boost: &[f64],
    baro: Option<&[f64]>,
    keep: impl Fn(usize) -> bool,
) -> (Vec<f64>, Option<Vec<f64>>) {
    let idx = (0..boost.len())
        .filter(|&i| boost[i] > MIN_BOOST_PSI && keep(i))
        .collect::<Vec<_>>();
    let gauge = idx.iter().map(|&i| emp[i] / boost[i]).collect();
    let absolute = baro.map(|baro| {
        idx.iter()
            .map(|&i| (emp[i] + baro[i]) / (boost[i] + baro[i]))
            .collect()
    });
    (gauge, absolute)
}

/// EMP:boost ratio over samples with `boost_actual_psi > 2.0`.
///
/// `None` when EMP or boost is missing, no sample clears the boost floor, or
/// every masked ratio is non-finite.
pub fn emp_boost_ratio(slice: &TableSlice<'_>) -> Option<EmpBoostRatio> {
    let [emp, boost] = slice.columns([Field::EmpPsi, Field::BoostActualPsi])?;
    let baro = slice.column(Field::BaroPsi);
    let (gauge, absolute) = masked_ratios(emp, boost, baro, |_| true);
    if gauge.is_empty() {
        return None;
    }
    Some(EmpBoostRatio {
        gauge: nan_median(&gauge)?,
        absolute: absolute.as_deref().and_then(nan_median),
    })
}

/// EMP:boost ratio binned by RPM over consecutive `edges`.
///
/// Bins are `[lo, hi)`; a bin is reported only with at least eight samples
/// above the boost floor.
pub fn emp_ratio_by_rpm(slice: &TableSlice<'_>, edges: &[u32]) -> Vec<EmpRpmBin> {
    let Some([emp, boost]) = slice.columns([Field::EmpPsi, Field::BoostActualPsi]) else {
        return Vec::new();
    };
    let rpm = slice.rpm();
    let baro = slice.column(Field::BaroPsi);

    edges
        .windows(2)
        .filter_map(|pair| {
            let (lo, hi) = (pair[0], pair[1]);
            let in_bin = |i: usize| rpm[i] >= f64::from(lo) && rpm[i] < f64::from(hi);
            let (gauge, absolute) = masked_ratios(emp, boost, baro, in_bin);
            if gauge.len() < MIN_BIN_SAMPLES {
                return None;
            }
            Some(EmpRpmBin {
                rpm_lo: lo,
                rpm_hi: hi,
                ratio_g_median: nan_median(&gauge)?,
                ratio_abs_median: absolute.as_deref().and_then(nan_median),
                n: gauge.len(),
            })
        })
        .collect()
}

pub(crate) fn evaluate(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let ratio = emp_boost_ratio(slice)?;
    let gr = ratio.gauge;
    let severity = if gr > RATIO_FAIL {
        Severity::Fail
    } else if gr > RATIO_WARN {
        Severity::Warn
    } else {
        Severity::Info
    };
    let mut detail = format!("Median EMP:Boost (gauge) ratio ≈ {gr:.2}");
    if let Some(ar) = ratio.absolute {
        detail.push_str(&format!(" (absolute ≈ {ar:.2})"));
    }
    detail.push_str(". Higher ratios often indicate turbine choking/restriction or pre-turb issues.");

    let mut findings = vec![Finding::new(
        FindingCode::EmpRatio,
        severity,
        detail,
        Evidence::new()
            .with("emp_boost_gauge_ratio_median", gr)
            .with("emp_boost_abs_ratio_median", ratio.absolute),
    )];

    let bins = emp_ratio_by_rpm(slice, &EMP_RPM_BIN_EDGES);
    if let (Some(first), Some(last)) = (bins.first(), bins.last()) {
        let (first, last) = (first.ratio_g_median, last.ratio_g_median);
        let delta = last - first;
        let severity = if last > RATIO_FAIL || delta > RPM_TREND_DELTA_WARN {
            Severity::Warn
        } else {
            Severity::Info
        };
        findings.push(Finding::new(
            FindingCode::EmpRatioRpm,
            severity,
            format!(
                "EMP:Boost rises from ~{first:.2} to ~{last:.2} across bins (Δ≈{delta:.2}). Useful to spot where turbine starts choking."
            ),
            Evidence::new()
                .with("bins", bins.iter().map(EmpRpmBin::to_evidence).collect::<Vec<_>>())
                .with("delta_first_last", delta),
        ));
    }
    Some(findings)
}
