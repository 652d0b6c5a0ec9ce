// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SegmentDetector;
use crate::runs::{candidate_runs, rpm_slope};
use logtool_core::{Field, LogError, Segment, SegmentKind, TelemetryTable};

const DEFAULT_APP_MAX: f64 = 20.0;
const DEFAULT_RPM_SLOPE_MAX: f64 = 40.0;
const DEFAULT_MIN_DURATION_S: f64 = 10.0;
const DEFAULT_THROTTLE_MIN: f64 = 5.0;
const DEFAULT_THROTTLE_MAX: f64 = 40.0;

/// Thresholds for [`CruiseDetector`].
///
/// The throttle window excludes idle and decel fuel cut at the low end.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct CruiseDetectorConfig {
    pub app_max: f64,
    pub rpm_slope_max: f64,
    pub min_duration_s: f64,
    pub throttle_min: f64,
    pub throttle_max: f64,
}

impl Default for CruiseDetectorConfig {
    fn default() -> Self {
        Self {
            app_max: DEFAULT_APP_MAX,
            rpm_slope_max: DEFAULT_RPM_SLOPE_MAX,
            min_duration_s: DEFAULT_MIN_DURATION_S,
            throttle_min: DEFAULT_THROTTLE_MIN,
            throttle_max: DEFAULT_THROTTLE_MAX,
        }
    }
}

impl CruiseDetectorConfig {
    pub fn validate(&self) -> Result<(), LogError> {
        for (name, value) in [
            ("app_max", self.app_max),
            ("rpm_slope_max", self.rpm_slope_max),
            ("min_duration_s", self.min_duration_s),
            ("throttle_min", self.throttle_min),
            ("throttle_max", self.throttle_max),
        ] {
            if !value.is_finite() {
                return Err(LogError::invalid_input(format!(
                    "CruiseDetectorConfig.{name} must be finite; got {value}"
                )));
            }
        }
        if self.min_duration_s < 0.0 || self.rpm_slope_max < 0.0 {
            return Err(LogError::invalid_input(format!(
                "CruiseDetectorConfig.min_duration_s and rpm_slope_max must be >= 0; got {} and {}",
                self.min_duration_s, self.rpm_slope_max
            )));
        }
        if self.throttle_min > self.throttle_max {
            return Err(LogError::invalid_input(format!(
                "CruiseDetectorConfig throttle window is inverted: [{}, {}]",
                self.throttle_min, self.throttle_max
            )));
        }
        Ok(())
    }
}

/// Detects steady cruise windows used for fuel-trim diagnosis.
pub fn detect_steady_cruise(
    table: &TelemetryTable,
    app_max: f64,
    rpm_slope_max: f64,
    min_duration_s: f64,
    throttle_min: f64,
    throttle_max: f64,
) -> Vec<Segment> {
    detect_with(
        table,
        &CruiseDetectorConfig {
            app_max,
            rpm_slope_max,
            min_duration_s,
            throttle_min,
            throttle_max,
        },
    )
}

fn detect_with(table: &TelemetryTable, config: &CruiseDetectorConfig) -> Vec<Segment> {
    let (Some(app), Some(throttle)) = (table.column(Field::AppPct), table.column(Field::ThrottlePct))
    else {
        log::debug!("cruise detection skipped: app_pct or throttle_pct not logged");
        return vec![];
    };
    let time = table.time();
    let slope = rpm_slope(time, table.rpm());

    let steady = app
        .iter()
        .zip(throttle)
        .zip(&slope)
        .map(|((&pedal, &thr), &s)| {
            pedal <= config.app_max
                && s.abs() <= config.rpm_slope_max
                && thr >= config.throttle_min
                && thr <= config.throttle_max
        })
        .collect::<Vec<_>>();

    let segments = candidate_runs(&steady)
        .into_iter()
        .filter(|&(start, end)| time[end] - time[start] >= config.min_duration_s)
        .map(|(start_idx, end_idx)| Segment {
            kind: SegmentKind::Cruise,
            start_idx,
            end_idx,
        })
        .collect::<Vec<_>>();

    log::debug!("detected {} cruise window(s)", segments.len());
    segments
}

/// Config-driven steady cruise detector.
#[derive(Clone, Debug, Default)]
pub struct CruiseDetector {
    config: CruiseDetectorConfig,
}

impl CruiseDetector {
    pub fn new(config: CruiseDetectorConfig) -> Result<Self, LogError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CruiseDetectorConfig {
        &self.config
    }
}

impl SegmentDetector for CruiseDetector {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Cruise
    }

    fn detect(&self, table: &TelemetryTable) -> Vec<Segment> {
        detect_with(table, &self.config)
    }
}
