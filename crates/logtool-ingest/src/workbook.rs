// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Excel workbook reader. The first worksheet is the log; its first non-empty
//! row is the header.

use crate::csv::RawLog;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use logtool_core::LogError;
use std::io::Cursor;
use std::path::Path;

/// Reads the first worksheet of an `.xlsx` or `.xls` file.
pub fn read_workbook(path: &Path) -> Result<RawLog, LogError> {
    let bytes = std::fs::read(path)
        .map_err(|err| LogError::io(format!("failed to read {}", path.display()), err))?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|err| {
        LogError::invalid_input(format!("failed to open workbook {}: {err}", path.display()))
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LogError::invalid_input(format!("{} has no worksheets", path.display())))?
        .map_err(|err| {
            LogError::invalid_input(format!("failed to read worksheet in {}: {err}", path.display()))
        })?;

    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)));
    let Some(header) = rows.next() else {
        return Err(LogError::invalid_input("worksheet is empty"));
    };
    let headers = header
        .iter()
        .map(|cell| cell_text(cell).trim().to_string())
        .collect::<Vec<_>>();
    let mut columns = vec![Vec::new(); headers.len()];
    for row in rows {
        for (column, cell) in columns.iter_mut().zip(row) {
            column.push(cell_text(cell));
        }
    }
    log::debug!(
        "read {} rows x {} columns from {}",
        columns.first().map_or(0, Vec::len),
        headers.len(),
        path.display()
    );

    Ok(RawLog { headers, columns })
}

/// Renders a cell the way the numeric cleanup expects to see it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(flag) => u8::from(*flag).to_string(),
        other => other.to_string(),
    }
}
