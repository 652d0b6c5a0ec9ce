// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SegmentDetector;
use crate::runs::{candidate_runs, rpm_slope};
use logtool_core::{Field, LogError, Segment, SegmentKind, TelemetryTable};

const DEFAULT_APP_THRESH: f64 = 95.0;
const DEFAULT_MIN_RPM_SLOPE: f64 = 50.0;
const DEFAULT_MIN_DURATION_S: f64 = 1.5;
const DEFAULT_MIN_RPM_RISE: f64 = 500.0;

/// Thresholds for [`WotPullDetector`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct WotDetectorConfig {
    /// Minimum pedal position (%).
    pub app_thresh: f64,
    /// Minimum instantaneous RPM slope (rpm/s).
    pub min_rpm_slope: f64,
    pub min_duration_s: f64,
    /// Required RPM gain from first to last sample (strictly greater).
    pub min_rpm_rise: f64,
}

impl Default for WotDetectorConfig {
    fn default() -> Self {
        Self {
            app_thresh: DEFAULT_APP_THRESH,
            min_rpm_slope: DEFAULT_MIN_RPM_SLOPE,
            min_duration_s: DEFAULT_MIN_DURATION_S,
            min_rpm_rise: DEFAULT_MIN_RPM_RISE,
        }
    }
}

impl WotDetectorConfig {
    pub fn validate(&self) -> Result<(), LogError> {
        for (name, value) in [
            ("app_thresh", self.app_thresh),
            ("min_rpm_slope", self.min_rpm_slope),
            ("min_duration_s", self.min_duration_s),
            ("min_rpm_rise", self.min_rpm_rise),
        ] {
            if !value.is_finite() {
                return Err(LogError::invalid_input(format!(
                    "WotDetectorConfig.{name} must be finite; got {value}"
                )));
            }
        }
        if self.min_duration_s < 0.0 {
            return Err(LogError::invalid_input(format!(
                "WotDetectorConfig.min_duration_s must be >= 0; got {}",
                self.min_duration_s
            )));
        }
        Ok(())
    }
}

/// Detects full-throttle pulls: pedal pinned and RPM climbing.
pub fn detect_wot_pulls(
    table: &TelemetryTable,
    app_thresh: f64,
    min_rpm_slope: f64,
    min_duration_s: f64,
) -> Vec<Segment> {
    detect_with(
        table,
        &WotDetectorConfig {
            app_thresh,
            min_rpm_slope,
            min_duration_s,
            ..WotDetectorConfig::default()
        },
    )
}

fn detect_with(table: &TelemetryTable, config: &WotDetectorConfig) -> Vec<Segment> {
    let Some(app) = table.column(Field::AppPct) else {
        log::debug!("WOT detection skipped: app_pct not logged");
        return vec![];
    };
    let time = table.time();
    let rpm = table.rpm();
    let slope = rpm_slope(time, rpm);

    let is_wot = app
        .iter()
        .zip(&slope)
        .map(|(&pedal, &s)| pedal >= config.app_thresh && s >= config.min_rpm_slope)
        .collect::<Vec<_>>();

    let segments = candidate_runs(&is_wot)
        .into_iter()
        .filter(|&(start, end)| {
            time[end] - time[start] >= config.min_duration_s
                && rpm[end] - rpm[start] > config.min_rpm_rise
        })
        .map(|(start_idx, end_idx)| Segment {
            kind: SegmentKind::WotPull,
            start_idx,
            end_idx,
        })
        .collect::<Vec<_>>();

    log::debug!("detected {} WOT pull(s)", segments.len());
    segments
}

/// Config-driven WOT pull detector.
#[derive(Clone, Debug, Default)]
pub struct WotPullDetector {
    config: WotDetectorConfig,
}

impl WotPullDetector {
    pub fn new(config: WotDetectorConfig) -> Result<Self, LogError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WotDetectorConfig {
        &self.config
    }
}

impl SegmentDetector for WotPullDetector {
    fn kind(&self) -> SegmentKind {
        SegmentKind::WotPull
    }

    fn detect(&self, table: &TelemetryTable) -> Vec<Segment> {
        detect_with(table, &self.config)
    }
}
