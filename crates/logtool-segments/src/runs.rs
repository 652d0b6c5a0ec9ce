// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Instantaneous RPM slope in rpm/s.
///
/// The first sample is differenced against itself (slope 0). A zero or
/// non-finite time step yields 0 rather than an infinite slope.
pub fn rpm_slope(time_s: &[f64], rpm: &[f64]) -> Vec<f64> {
    let n = time_s.len().min(rpm.len());
    let mut slope = Vec::with_capacity(n);
    for i in 0..n {
        let prev = i.saturating_sub(1);
        let dt = time_s[i] - time_s[prev];
        let dr = rpm[i] - rpm[prev];
        let value = if dt == 0.0 { 0.0 } else { dr / dt };
        slope.push(if value.is_finite() { value } else { 0.0 });
    }
    slope
}

/// Candidate runs of a per-sample predicate as inclusive `(start, end)` pairs.
///
/// A run opens on the first true sample and closes at the first false sample
/// after it, or at the last sample. The closing sample is part of the run in
/// both cases.
pub(crate) fn candidate_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = vec![];
    let Some(last) = flags.len().checked_sub(1) else {
        return runs;
    };
    let mut open: Option<usize> = None;
    for (i, &flag) in flags.iter().enumerate() {
        if flag && open.is_none() {
            open = Some(i);
        }
        if let Some(start) = open {
            if !flag || i == last {
                runs.push((start, i));
                open = None;
            }
        }
    }
    runs
}
