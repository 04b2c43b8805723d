// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! NaN-aware reductions shared by the repair filters and the cycle rules.
//!
//! Empty and all-NaN inputs yield `f32::NAN` rather than tripping on a
//! library warning; callers that need a sentinel map the NaN themselves.

/// Number of finite samples in `values`.
pub fn finite_count(values: &[f32]) -> usize {
    values.iter().filter(|v| v.is_finite()).count()
}

/// Median of the finite samples, `NAN` when there are none.
pub fn nan_median(values: &[f32]) -> f32 {
    let mut finite: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| f64::from(*v))
        .collect();
    median_in_place(&mut finite)
}

/// Linear-interpolation percentile of the finite samples, `NAN` when there
/// are none. `pct` is clamped to `[0, 100]`.
pub fn nan_percentile(values: &[f32], pct: f32) -> f32 {
    let mut finite: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| f64::from(*v))
        .collect();
    if finite.is_empty() {
        return f32::NAN;
    }
    finite.sort_by(|a, b| a.total_cmp(b));
    let pct = f64::from(pct.clamp(0.0, 100.0));
    let rank = pct / 100.0 * (finite.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    (finite[lo] + (finite[hi] - finite[lo]) * frac) as f32
}

/// Spread of the finite samples between two percentiles, `NAN` when there
/// are none. `(0, 100)` degenerates to `max - min`.
pub fn nan_extent(values: &[f32], percentiles: (f32, f32)) -> f32 {
    if percentiles == (0.0, 100.0) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values.iter().filter(|v| v.is_finite()) {
            let v = f64::from(*v);
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() {
            (hi - lo) as f32
        } else {
            f32::NAN
        }
    } else {
        nan_percentile(values, percentiles.1) - nan_percentile(values, percentiles.0)
    }
}

/// High-frequency noise estimate: the median of the absolute differences
/// between consecutive finite samples. `NAN` when fewer than two finite
/// samples are available.
///
/// Too low a value is a sign the tracker re-emitted a stale position instead
/// of computing a fresh one; too high a value points at excess Brownian or
/// rocking motion.
pub fn hf_sigma(values: &[f32]) -> f32 {
    let mut diffs: Vec<f64> = Vec::with_capacity(values.len());
    let mut last: Option<f64> = None;
    for v in values.iter().filter(|v| v.is_finite()) {
        let v = f64::from(*v);
        if let Some(prev) = last {
            diffs.push((v - prev).abs());
        }
        last = Some(v);
    }
    median_in_place(&mut diffs)
}

fn median_in_place(values: &mut [f64]) -> f32 {
    if values.is_empty() {
        return f32::NAN;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    let med = if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    };
    med as f32
}
