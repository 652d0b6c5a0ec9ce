// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Segment detection: turns a telemetry table into labeled, inclusive index
//! ranges (full-throttle pulls and steady cruise windows).

mod cruise;
mod runs;
mod wot;

pub use cruise::{CruiseDetector, CruiseDetectorConfig, detect_steady_cruise};
pub use runs::rpm_slope;
pub use wot::{WotDetectorConfig, WotPullDetector, detect_wot_pulls};

use logtool_core::{Segment, SegmentKind, TelemetryTable};

/// Detector contract: full table in, segments of one kind out.
///
/// Detectors never fail on missing channels; they return an empty list.
pub trait SegmentDetector {
    fn kind(&self) -> SegmentKind;
    fn detect(&self, table: &TelemetryTable) -> Vec<Segment>;
}

/// Concatenates detector outputs and orders them by `start_idx`.
///
/// The sort is stable, so among equal starts earlier lists win. Overlapping
/// segments of different kinds are kept as-is.
pub fn merge_segments<I>(lists: I) -> Vec<Segment>
where
    I: IntoIterator<Item = Vec<Segment>>,
{
    let mut merged = lists.into_iter().flatten().collect::<Vec<_>>();
    merged.sort_by_key(|segment| segment.start_idx);
    merged
}
