// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

#[path = "common.rs"]
mod common;

use libfuzzer_sys::fuzz_target;
use logtool_core::{Field, TelemetryTable};
use logtool_doctor::{AnalysisConfig, analyze};

fn channel_value(cursor: &mut common::ByteCursor<'_>) -> f64 {
    match cursor.next_u8() % 8 {
        0 => f64::NAN,
        1 => f64::INFINITY,
        2 => cursor.next_f64(),
        _ => f64::from(cursor.next_i16()) / 8.0,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = common::ByteCursor::new(data);
    let n = common::bounded(cursor.next_u8(), 0, 400);

    let mut time = Vec::with_capacity(n);
    let mut rpm = Vec::with_capacity(n);
    let mut t = 0.0;
    for _ in 0..n {
        t += f64::from(cursor.next_u8() % 4) * 0.05;
        time.push(t);
        rpm.push(f64::from(cursor.next_i16()).abs());
    }
    let Ok(mut table) = TelemetryTable::new(time, rpm) else {
        return;
    };

    let channels = common::bounded(cursor.next_u8(), 0, Field::ALL.len());
    for _ in 0..channels {
        let field = Field::ALL[usize::from(cursor.next_u8()) % Field::ALL.len()];
        if matches!(field, Field::TimeS | Field::Rpm) {
            continue;
        }
        let pedal_like = cursor.next_u8() & 1 == 0;
        let values = (0..n)
            .map(|_| {
                if pedal_like {
                    if cursor.next_u8() & 1 == 0 { 100.0 } else { 0.0 }
                } else {
                    channel_value(&mut cursor)
                }
            })
            .collect();
        table = match table.with_column(field, values) {
            Ok(table) => table,
            Err(_) => return,
        };
    }

    let config = AnalysisConfig {
        include_cruise: cursor.next_u8() & 1 == 1,
        ..AnalysisConfig::default()
    };
    let _ = analyze(&table, &config);
});
