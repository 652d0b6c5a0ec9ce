// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Rule engine: turns one segment's telemetry into [`Finding`]s.
//!
//! Every rule is capability-gated. A rule whose channels are missing from the
//! slice is skipped without producing a finding or an error.

mod aircharge;
mod boost;
mod context;
mod cruise;
mod emp;
mod fuel;
mod knock;
mod throttle;
mod wastegate;

#[cfg(test)]
mod test_support;

pub use boost::{BoostStats, oscillation_rate};
pub use context::{WgPolarity, WotContext, infer_wg_polarity};
pub use emp::{EMP_RPM_BIN_EDGES, EmpBoostRatio, EmpRpmBin, emp_boost_ratio, emp_ratio_by_rpm};

use logtool_core::{Finding, TableSlice};

type WotRule = fn(&TableSlice<'_>, &WotContext) -> Option<Vec<Finding>>;
type CruiseRule = fn(&TableSlice<'_>) -> Option<Vec<Finding>>;

/// WOT rules in report order.
const WOT_RULES: &[(&str, WotRule)] = &[
    ("throttle_closure", throttle::evaluate),
    ("boost_tracking", boost::evaluate_tracking),
    ("component_protection", boost::evaluate_protection),
    ("wastegate", wastegate::evaluate),
    ("emp_ratio", emp::evaluate),
    ("fuel_rail", fuel::evaluate_rail),
    ("afr_tracking", fuel::evaluate_afr),
    ("knock", knock::evaluate),
    ("aircharge", aircharge::evaluate),
];

const CRUISE_RULES: &[(&str, CruiseRule)] = &[
    ("cruise_trims", cruise::evaluate_trims),
    ("cruise_afr_variability", cruise::evaluate_afr_variability),
];

/// Evaluates every WOT-pull rule against `slice`.
///
/// The wastegate polarity guess and the underboost flag are derived once into
/// a [`WotContext`] before any rule runs.
pub fn run_wot_rules(slice: &TableSlice<'_>) -> Vec<Finding> {
    let ctx = WotContext::from_slice(slice);
    run_wot_rules_with(slice, &ctx)
}

/// Evaluates every WOT-pull rule with a precomputed context.
pub fn run_wot_rules_with(slice: &TableSlice<'_>, ctx: &WotContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, rule) in WOT_RULES {
        match rule(slice, ctx) {
            Some(mut emitted) => findings.append(&mut emitted),
            None => log::debug!("wot rule {name} skipped: required channels unavailable"),
        }
    }
    findings
}

/// Evaluates the steady-cruise rules against `slice`.
pub fn run_cruise_rules(slice: &TableSlice<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, rule) in CRUISE_RULES {
        match rule(slice) {
            Some(mut emitted) => findings.append(&mut emitted),
            None => log::debug!("cruise rule {name} skipped: required channels unavailable"),
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::{run_cruise_rules, run_wot_rules};
    use logtool_core::TelemetryTable;

    #[test]
    fn bare_table_yields_no_findings() {
        let table = TelemetryTable::new(vec![0.0, 0.1, 0.2], vec![3000.0, 3100.0, 3200.0])
            .expect("valid table");
        assert!(run_wot_rules(&table.as_slice()).is_empty());
        assert!(run_cruise_rules(&table.as_slice()).is_empty());
    }
}
