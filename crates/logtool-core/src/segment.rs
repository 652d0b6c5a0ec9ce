// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::LogError;
use std::fmt;

/// Driving-event category of a detected segment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    /// Full-throttle acceleration pull.
    #[cfg_attr(feature = "serde", serde(rename = "WOT_PULL"))]
    WotPull,
    /// Steady, low-load cruise window.
    #[cfg_attr(feature = "serde", serde(rename = "CRUISE"))]
    Cruise,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WotPull => "WOT_PULL",
            Self::Cruise => "CRUISE",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive index range `[start_idx, end_idx]` into a telemetry table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start_idx: usize,
    pub end_idx: usize,
}

impl Segment {
    pub fn new(kind: SegmentKind, start_idx: usize, end_idx: usize) -> Result<Self, LogError> {
        if start_idx > end_idx {
            return Err(LogError::invalid_input(format!(
                "segment start_idx ({start_idx}) must be <= end_idx ({end_idx})"
            )));
        }
        Ok(Self {
            kind,
            start_idx,
            end_idx,
        })
    }

    /// Number of samples covered.
    pub fn sample_count(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start_idx <= other.end_idx && other.start_idx <= self.end_idx
    }
}
