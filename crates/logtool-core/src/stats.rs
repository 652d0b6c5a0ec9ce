// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! NaN-ignoring summary statistics.
//!
//! Every helper skips non-finite values and returns `None` when nothing finite
//! remains, so callers can treat degenerate input as "unknown" instead of an
//! error.

/// Standard deviations below this are treated as constant signals.
pub const DEGENERATE_STD: f64 = 1.0e-6;

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn nan_mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn nan_min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .min_by(|a, b| a.total_cmp(b))
}

pub fn nan_max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .max_by(|a, b| a.total_cmp(b))
}

pub fn nan_median(values: &[f64]) -> Option<f64> {
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) * 0.5)
    }
}

/// Percentile `q` in `[0, 100]`, linearly interpolated between closest ranks.
pub fn nan_percentile(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&q) {
        return None;
    }
    let sorted = sorted_finite(values);
    let last = sorted.len().checked_sub(1)?;
    let rank = q / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Population standard deviation.
pub fn nan_std(values: &[f64]) -> Option<f64> {
    let mean = nan_mean(values)?;
    let (ss, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(ss, count), v| {
            (ss + (v - mean) * (v - mean), count + 1)
        });
    Some((ss / count as f64).sqrt())
}

/// Pearson correlation of two equally long series.
///
/// `None` when lengths differ, any value is non-finite, or either series is
/// effectively constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }
    let sx = nan_std(x)?;
    let sy = nan_std(y)?;
    if sx < DEGENERATE_STD || sy < DEGENERATE_STD {
        return None;
    }
    let mx = nan_mean(x)?;
    let my = nan_mean(y)?;
    let cov = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum::<f64>()
        / x.len() as f64;
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

/// Percentage of `true` flags over all rows; `0.0` for no rows.
pub fn pct_true<I>(flags: I) -> f64
where
    I: IntoIterator<Item = bool>,
{
    let (hits, total) = flags
        .into_iter()
        .fold((0usize, 0usize), |(hits, total), flag| {
            (hits + usize::from(flag), total + 1)
        });
    if total == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / total as f64
    }
}

/// Element-wise `a - b`; NaN wherever either side is missing.
pub fn difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}
