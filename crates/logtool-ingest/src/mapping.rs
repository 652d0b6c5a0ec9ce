// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::csv::RawLog;
use logtool_core::Field;
use std::collections::BTreeMap;

/// Honda Civic Type R (FK8) Cobb Accessport monitor names.
pub const FK8_COBB_HEADERS: &[(&str, Field)] = &[
    ("Time (sec)", Field::TimeS),
    ("Engine Speed (RPM)", Field::Rpm),
    ("Gear (-)", Field::Gear),
    ("Accelerator Pedal Position (%)", Field::AppPct),
    ("ETC Angle Actual (%)", Field::ThrottlePct),
    ("AFR Actual (AFR)", Field::AfrActual),
    ("AFR Commanded (Final) (AFR)", Field::AfrCmd),
    ("Short Term Fuel Trim (%)", Field::StftPct),
    ("Long Term Fuel Trim (%)", Field::LtftPct),
    ("FRP Actual (psi)", Field::FrpActualPsi),
    ("FRP Desired (psi)", Field::FrpTargetPsi),
    ("HPFP Spill Valve Duty Cycle (Feed Forward) (kW)", Field::HpfpSpillFf),
    ("HPFP Spill Valve Duty Cycle (Final) (kW)", Field::HpfpSpillFinal),
    ("Fuel Status (-)", Field::FuelStatus),
    ("Boost Pressure (psi)", Field::BoostActualPsi),
    ("Target Boost Pressure (psi)", Field::BoostTargetPsi),
    ("MAP (psi)", Field::MapPsi),
    ("Barometric Pressure (psi)", Field::BaroPsi),
    ("Pressure Upstream Throttle Actual (psi)", Field::PreThrottlePActPsi),
    ("Pressure Upstream Throttle Desired (psi)", Field::PreThrottlePDesPsi),
    ("Exhaust Manifold Pressure (psi)", Field::EmpPsi),
    ("Intake Air Temperature (C)", Field::IatC),
    ("Manifold Air Temperature (C)", Field::MatC),
    ("Battery Voltage (V)", Field::BatteryV),
    ("Wastegate Position Actual (-)", Field::WgPosAct),
    ("Wastegate Position Desired (-)", Field::WgPosDes),
    ("Turbo PID I-Term (-)", Field::TurboPidI),
    ("Turbo PID PD-Term (-)", Field::TurboPidPd),
    ("Turbo Maximum Boost - Component Protection (psi)", Field::TurboCompProtectPsi),
    ("Knock Level (Reference) (V)", Field::KnockRefV),
    ("Knock Ratio (Int/Ref) (-)", Field::KnockRatio1),
    ("Knock Ratio (Int/Ref) (2) (V)", Field::KnockRatio2),
    ("Ignition Timing Cyl1 (kW)", Field::IgnCyl1),
    ("Ignition Timing Cyl2 (kW)", Field::IgnCyl2),
    ("Ignition Timing Cyl3 (kW)", Field::IgnCyl3),
    ("Ignition Timing Cyl4 (kW)", Field::IgnCyl4),
    ("Knock Retard Cyl1 (kW)", Field::KrCyl1),
    ("Knock Retard Cyl2 (kW)", Field::KrCyl2),
    ("Knock Retard Cyl3 (kW)", Field::KrCyl3),
    ("Knock Retard Cyl4 (kW)", Field::KrCyl4),
];

/// Collapses whitespace runs to one space and trims the ends.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered raw-header to canonical-field table.
///
/// Lookup is whitespace-insensitive. When several entries target the same
/// field, the later one wins.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderMapping {
    entries: Vec<(String, Field)>,
}

impl HeaderMapping {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn fk8_cobb() -> Self {
        Self {
            entries: FK8_COBB_HEADERS
                .iter()
                .map(|(raw, field)| ((*raw).to_string(), *field))
                .collect(),
        }
    }

    /// Adds an entry, replacing any earlier entry for the same header.
    pub fn with(mut self, raw: impl Into<String>, field: Field) -> Self {
        let raw = raw.into();
        let key = normalize_header(&raw);
        self.entries
            .retain(|(existing, _)| normalize_header(existing) != key);
        self.entries.push((raw, field));
        self
    }

    pub fn entries(&self) -> &[(String, Field)] {
        &self.entries
    }
}

impl Default for HeaderMapping {
    fn default() -> Self {
        Self::fk8_cobb()
    }
}

/// Canonical columns selected from a [`RawLog`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappingResult {
    pub columns: BTreeMap<Field, Vec<String>>,
    /// Raw header names that were found, with their canonical field.
    pub mapped: Vec<(String, Field)>,
    /// Expected raw header names absent from the log.
    pub missing: Vec<String>,
}

/// Selects and renames the columns named in `mapping`; others are dropped.
pub fn map_columns(raw: &RawLog, mapping: &HeaderMapping) -> MappingResult {
    let mut by_header = BTreeMap::new();
    for (idx, header) in raw.headers.iter().enumerate() {
        by_header.insert(normalize_header(header), idx);
    }

    let mut result = MappingResult::default();
    for (raw_name, field) in mapping.entries() {
        match by_header.get(&normalize_header(raw_name)) {
            Some(&idx) => {
                result.columns.insert(*field, raw.columns[idx].clone());
                result.mapped.push((raw_name.clone(), *field));
            }
            None => result.missing.push(raw_name.clone()),
        }
    }

    let unmapped = raw.headers.len().saturating_sub(result.mapped.len());
    if unmapped > 0 {
        log::warn!("{unmapped} source column(s) have no canonical mapping and were dropped");
    }
    result
}
