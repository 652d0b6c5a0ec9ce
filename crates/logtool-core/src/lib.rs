// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Core shared types for logtool: the telemetry table contract, segments,
//! findings, and the NaN-aware statistics the rule engine is built on.

pub mod diagnostics;
pub mod error;
pub mod field;
pub mod finding;
pub mod segment;
pub mod stats;
pub mod telemetry;

pub use diagnostics::{DIAGNOSTICS_SCHEMA_VERSION, RunDiagnostics};
pub use error::LogError;
pub use field::Field;
pub use finding::{Evidence, EvidenceValue, Finding, FindingCode, Severity};
pub use segment::{Segment, SegmentKind};
pub use telemetry::{TableSlice, TelemetryTable};
