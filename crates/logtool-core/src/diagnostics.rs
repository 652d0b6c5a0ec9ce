// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{Field, SegmentKind, TelemetryTable};

/// Schema version of the exported run document.
pub const DIAGNOSTICS_SCHEMA_VERSION: u32 = 1;

/// Run-level metadata captured alongside the segment reports.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RunDiagnostics {
    pub schema_version: u32,
    pub engine_version: Option<String>,
    pub n_samples: usize,
    pub fields_present: Vec<Field>,
    pub missing_headers: Vec<String>,
    pub rows_dropped: usize,
    pub wot_segments: usize,
    pub cruise_segments: usize,
    pub notes: Vec<String>,
}

impl Default for RunDiagnostics {
    fn default() -> Self {
        Self {
            schema_version: DIAGNOSTICS_SCHEMA_VERSION,
            engine_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            n_samples: 0,
            fields_present: vec![],
            missing_headers: vec![],
            rows_dropped: 0,
            wot_segments: 0,
            cruise_segments: 0,
            notes: vec![],
        }
    }
}

impl RunDiagnostics {
    /// Seeds diagnostics from the table that will be analyzed.
    pub fn for_table(table: &TelemetryTable) -> Self {
        Self {
            n_samples: table.len(),
            fields_present: table.fields().collect(),
            ..Self::default()
        }
    }

    pub fn record_segment(&mut self, kind: SegmentKind) {
        match kind {
            SegmentKind::WotPull => self.wot_segments += 1,
            SegmentKind::Cruise => self.cruise_segments += 1,
        }
    }

    pub fn total_segments(&self) -> usize {
        self.wot_segments + self.cruise_segments
    }
}
