// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::{Field, TelemetryTable};

/// 10 Hz pull with rpm climbing 100 rpm per sample plus the given channels.
pub(crate) fn pull(n: usize, channels: Vec<(Field, Vec<f64>)>) -> TelemetryTable {
    let time = (0..n).map(|i| i as f64 * 0.1).collect::<Vec<_>>();
    let rpm = (0..n).map(|i| 2500.0 + i as f64 * 100.0).collect::<Vec<_>>();
    channels
        .into_iter()
        .try_fold(
            TelemetryTable::new(time, rpm).expect("valid base table"),
            |table, (field, values)| table.with_column(field, values),
        )
        .expect("valid channels")
}

pub(crate) fn constant(n: usize, value: f64) -> Vec<f64> {
    vec![value; n]
}
