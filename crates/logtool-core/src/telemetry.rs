// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{Field, LogError, Segment};
use std::collections::BTreeMap;

/// Column-oriented, time-ordered telemetry log.
///
/// `time_s` and `rpm` are always present and finite; every other channel is
/// optional and may contain NaN cells where the source value could not be
/// coerced.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryTable {
    n: usize,
    columns: BTreeMap<Field, Vec<f64>>,
}

impl TelemetryTable {
    /// Builds a table holding only the mandatory channels.
    pub fn new(time_s: Vec<f64>, rpm: Vec<f64>) -> Result<Self, LogError> {
        let mut columns = BTreeMap::new();
        columns.insert(Field::TimeS, time_s);
        columns.insert(Field::Rpm, rpm);
        Self::from_columns(columns)
    }

    /// Builds a validated table from canonical columns.
    pub fn from_columns(columns: BTreeMap<Field, Vec<f64>>) -> Result<Self, LogError> {
        let time = columns
            .get(&Field::TimeS)
            .ok_or_else(|| LogError::invalid_input("telemetry table requires a time_s column"))?;
        let rpm = columns
            .get(&Field::Rpm)
            .ok_or_else(|| LogError::invalid_input("telemetry table requires an rpm column"))?;
        let n = time.len();

        for (field, values) in &columns {
            if values.len() != n {
                return Err(LogError::invalid_input(format!(
                    "column length mismatch: {field} has {} samples, time_s has {n}",
                    values.len()
                )));
            }
        }

        if let Some(idx) = time.iter().position(|t| !t.is_finite()) {
            return Err(LogError::invalid_input(format!(
                "time_s must be finite; sample {idx} is {}",
                time[idx]
            )));
        }
        if let Some(idx) = rpm.iter().position(|r| !r.is_finite()) {
            return Err(LogError::invalid_input(format!(
                "rpm must be finite; sample {idx} is {}",
                rpm[idx]
            )));
        }
        if let Some(idx) = time.windows(2).position(|w| w[1] < w[0]) {
            return Err(LogError::invalid_input(format!(
                "time_s must be sorted ascending; sample {} ({}) precedes {} ({})",
                idx,
                time[idx],
                idx + 1,
                time[idx + 1]
            )));
        }

        Ok(Self { n, columns })
    }

    /// Adds or replaces an optional channel.
    pub fn with_column(mut self, field: Field, values: Vec<f64>) -> Result<Self, LogError> {
        if values.len() != self.n {
            return Err(LogError::invalid_input(format!(
                "column length mismatch: {field} has {} samples, table has {}",
                values.len(),
                self.n
            )));
        }
        if matches!(field, Field::TimeS | Field::Rpm) {
            let mut columns = std::mem::take(&mut self.columns);
            columns.insert(field, values);
            return Self::from_columns(columns);
        }
        self.columns.insert(field, values);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn time(&self) -> &[f64] {
        self.columns
            .get(&Field::TimeS)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rpm(&self) -> &[f64] {
        self.columns
            .get(&Field::Rpm)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw column values, if the channel was logged.
    pub fn column(&self, field: Field) -> Option<&[f64]> {
        self.columns.get(&field).map(Vec::as_slice)
    }

    pub fn has(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// Logged channels in catalog order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.columns.keys().copied()
    }

    /// Whole-table view.
    pub fn as_slice(&self) -> TableSlice<'_> {
        TableSlice {
            table: self,
            start: 0,
            end_exclusive: self.n,
        }
    }

    /// Inclusive `[start, end]` view.
    pub fn slice_range(&self, start: usize, end: usize) -> Result<TableSlice<'_>, LogError> {
        if start > end || end >= self.n {
            return Err(LogError::invalid_input(format!(
                "slice [{start}, {end}] is outside a table of {} samples",
                self.n
            )));
        }
        Ok(TableSlice {
            table: self,
            start,
            end_exclusive: end + 1,
        })
    }

    /// View over the samples covered by `segment`.
    pub fn slice(&self, segment: &Segment) -> Result<TableSlice<'_>, LogError> {
        self.slice_range(segment.start_idx, segment.end_idx)
    }
}

/// Borrowed window of a [`TelemetryTable`].
#[derive(Clone, Copy, Debug)]
pub struct TableSlice<'a> {
    table: &'a TelemetryTable,
    start: usize,
    end_exclusive: usize,
}

impl<'a> TableSlice<'a> {
    /// First table index covered by the slice.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.end_exclusive - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn time(&self) -> &'a [f64] {
        &self.table.time()[self.start..self.end_exclusive]
    }

    pub fn rpm(&self) -> &'a [f64] {
        &self.table.rpm()[self.start..self.end_exclusive]
    }

    /// Window of a logged channel, finite or not.
    pub fn raw(&self, field: Field) -> Option<&'a [f64]> {
        self.table
            .column(field)
            .map(|values| &values[self.start..self.end_exclusive])
    }

    /// Window of a channel that is usable for analysis.
    ///
    /// Returns `None` when the channel was not logged or holds no finite value
    /// inside this window.
    pub fn column(&self, field: Field) -> Option<&'a [f64]> {
        self.raw(field)
            .filter(|values| values.iter().any(|v| v.is_finite()))
    }

    /// All requested channels, or `None` if any of them is unusable.
    pub fn columns<const N: usize>(&self, fields: [Field; N]) -> Option<[&'a [f64]; N]> {
        let mut out: [&'a [f64]; N] = [&[]; N];
        for (slot, field) in out.iter_mut().zip(fields) {
            *slot = self.column(field)?;
        }
        Some(out)
    }

    pub fn has(&self, field: Field) -> bool {
        self.column(field).is_some()
    }
}
