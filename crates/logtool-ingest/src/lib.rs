// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Ingestion collaborators: read a raw log, map platform headers onto the
//! canonical [`Field`](logtool_core::Field) catalog, and coerce cells into a
//! validated [`TelemetryTable`](logtool_core::TelemetryTable).

pub mod cleanup;
pub mod csv;
pub mod mapping;
pub mod workbook;

pub use cleanup::{CleanedLog, basic_cleanup};
pub use csv::{RawLog, load_log, parse_csv};
pub use workbook::read_workbook;
pub use mapping::{FK8_COBB_HEADERS, HeaderMapping, MappingResult, map_columns, normalize_header};
