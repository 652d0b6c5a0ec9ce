// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::mapping::MappingResult;
use logtool_core::{Field, LogError, TelemetryTable};
use std::collections::BTreeMap;

/// Validated table plus what cleanup had to discard.
#[derive(Clone, Debug, PartialEq)]
pub struct CleanedLog {
    pub table: TelemetryTable,
    /// Rows without a finite `time_s` or `rpm`.
    pub rows_dropped: usize,
}

fn coerce(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Coerces mapped cells to numbers and builds a time-ordered table.
///
/// Unparseable or empty cells become NaN. Rows lacking a finite `time_s` or
/// `rpm` are dropped; the rest are stably sorted by `time_s`.
pub fn basic_cleanup(mapping: &MappingResult) -> Result<CleanedLog, LogError> {
    for required in [Field::TimeS, Field::Rpm] {
        if !mapping.columns.contains_key(&required) {
            return Err(LogError::invalid_input(format!(
                "log has no column mapped to {required}"
            )));
        }
    }

    let numeric = mapping
        .columns
        .iter()
        .map(|(field, cells)| (*field, cells.iter().map(|c| coerce(c)).collect::<Vec<_>>()))
        .collect::<BTreeMap<_, _>>();
    let (time, rpm) = match (numeric.get(&Field::TimeS), numeric.get(&Field::Rpm)) {
        (Some(time), Some(rpm)) => (time, rpm),
        _ => return Err(LogError::invalid_input("time_s and rpm columns are required")),
    };

    let mut keep = (0..time.len())
        .filter(|&i| time[i].is_finite() && rpm[i].is_finite())
        .collect::<Vec<_>>();
    keep.sort_by(|&a, &b| time[a].total_cmp(&time[b]));
    let rows_dropped = time.len() - keep.len();
    if rows_dropped > 0 {
        log::warn!("dropped {rows_dropped} row(s) without a finite time_s or rpm");
    }

    let columns = numeric
        .iter()
        .map(|(field, values)| (*field, keep.iter().map(|&i| values[i]).collect()))
        .collect::<BTreeMap<_, _>>();
    let table = TelemetryTable::from_columns(columns)?;
    Ok(CleanedLog {
        table,
        rows_dropped,
    })
}
