// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Synthetic drive logs shared by the benchmarks.

use logtool_core::{Field, LogError, TelemetryTable};
use std::collections::BTreeMap;

pub const SAMPLE_HZ: f64 = 10.0;

const CRUISE_SAMPLES: usize = 200;
const PULL_SAMPLES: usize = 40;
const LIFT_SAMPLES: usize = 30;

/// Samples in one cruise + pull + lift cycle.
pub const CYCLE_SAMPLES: usize = CRUISE_SAMPLES + PULL_SAMPLES + LIFT_SAMPLES;

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

/// Uniform noise in `[-1, 1)`.
fn noise(state: &mut u64) -> f64 {
    (lcg_next(state) >> 11) as f64 / (1u64 << 52) as f64 - 1.0
}

#[derive(Default)]
struct Columns(BTreeMap<Field, Vec<f64>>);

impl Columns {
    fn push(&mut self, field: Field, value: f64) {
        self.0.entry(field).or_default().push(value);
    }
}

/// A log of `cycles` repetitions of steady cruise, a WOT pull, and a lift,
/// with every channel the rule engine reads.
pub fn synthetic_log(cycles: usize, seed: u64) -> Result<TelemetryTable, LogError> {
    let mut state = seed;
    let mut cols = Columns::default();
    let mut t = 0.0;

    for _ in 0..cycles {
        for i in 0..CYCLE_SAMPLES {
            let (rpm, app, throttle, boost_target, boost) = if i < CRUISE_SAMPLES {
                (2200.0 + noise(&mut state), 12.0, 18.0, 0.0, -5.0)
            } else if i < CRUISE_SAMPLES + PULL_SAMPLES {
                let k = (i - CRUISE_SAMPLES) as f64 / PULL_SAMPLES as f64;
                (3000.0 + 3500.0 * k, 100.0, 95.0, 22.0, 19.0 + 0.5 * noise(&mut state))
            } else {
                let k = (i - CRUISE_SAMPLES - PULL_SAMPLES) as f64 / LIFT_SAMPLES as f64;
                (6500.0 - 3500.0 * k, 0.0, 5.0, 0.0, -8.0)
            };
            let wot = app >= 95.0;

            cols.push(Field::TimeS, t);
            cols.push(Field::Rpm, rpm);
            cols.push(Field::AppPct, app);
            cols.push(Field::ThrottlePct, throttle);
            cols.push(Field::BoostTargetPsi, boost_target);
            cols.push(Field::BoostActualPsi, boost);
            cols.push(Field::TurboCompProtectPsi, 24.0);
            cols.push(Field::EmpPsi, if wot { boost * 2.1 } else { 1.0 });
            cols.push(Field::BaroPsi, 14.5);
            cols.push(Field::PreThrottlePActPsi, boost + 0.5);
            cols.push(Field::WgPosAct, if wot { 90.0 + 5.0 * noise(&mut state) } else { 20.0 });
            cols.push(Field::FrpTargetPsi, if wot { 2900.0 } else { 700.0 });
            cols.push(Field::FrpActualPsi, if wot { 2700.0 + 50.0 * noise(&mut state) } else { 700.0 });
            cols.push(Field::HpfpSpillFinal, if wot { 80.0 } else { 20.0 });
            cols.push(Field::AfrCmd, if wot { 11.8 } else { 14.7 });
            cols.push(Field::AfrActual, (if wot { 11.9 } else { 14.7 }) + 0.2 * noise(&mut state));
            cols.push(Field::StftPct, 4.0 * noise(&mut state));
            cols.push(Field::LtftPct, 2.0);
            cols.push(Field::AirchargeDesPct, if wot { 120.0 } else { 30.0 });
            cols.push(Field::AirchargePct, if wot { 112.0 } else { 30.0 });
            for kr in Field::KNOCK_RETARD {
                cols.push(kr, if wot { -1.5 * noise(&mut state).abs() } else { 0.0 });
            }
            t += 1.0 / SAMPLE_HZ;
        }
    }

    TelemetryTable::from_columns(cols.0)
}
