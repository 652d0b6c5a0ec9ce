// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Minimal CSV reader for data-logger exports.
//!
//! One header row, comma separated, double-quoted cells may contain commas
//! and `""` escapes. Blank lines are skipped. Short rows are padded with empty
//! cells.

use logtool_core::LogError;
use std::path::Path;

/// Untyped log as read from disk, stored column by column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLog {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

impl RawLog {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}

/// Loads a log file by extension.
///
/// `.csv` goes through [`parse_csv`]; `.xlsx` and `.xls` are read from the
/// first worksheet. Any other extension is rejected.
pub fn load_log(path: &Path) -> Result<RawLog, LogError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| LogError::io(format!("failed to read {}", path.display()), err))?;
            parse_csv(&text)
        }
        "xlsx" | "xls" => crate::workbook::read_workbook(path),
        _ => Err(LogError::not_supported(format!(
            "unsupported file type: {}",
            path.display()
        ))),
    }
}

fn split_record(line: &str, line_no: usize) -> Result<Vec<String>, LogError> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                cell.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if cell.trim().is_empty() => {
                cell.clear();
                in_quotes = true;
            }
            (',', false) => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(ch),
        }
    }
    if in_quotes {
        return Err(LogError::parse(line_no, "unterminated quoted cell"));
    }
    cells.push(cell);
    Ok(cells)
}

/// Parses CSV text with a header row.
pub fn parse_csv(text: &str) -> Result<RawLog, LogError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err(LogError::invalid_input("CSV input is empty"));
    };
    let headers = split_record(header, header_line)?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    let width = headers.len();
    let mut columns = vec![Vec::new(); width];

    for (line_no, line) in lines {
        let cells = split_record(line, line_no)?;
        if cells.len() > width {
            return Err(LogError::parse(
                line_no,
                format!("row has {} cells but the header has {width}", cells.len()),
            ));
        }
        let filled = cells.len();
        for (column, cell) in columns.iter_mut().zip(cells) {
            column.push(cell);
        }
        for column in columns.iter_mut().skip(filled) {
            column.push(String::new());
        }
    }

    Ok(RawLog { headers, columns })
}
