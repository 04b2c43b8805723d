// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bounds::{bound_partial, check_spans};
use bqc_core::{BqcError, Partial, nan_extent};
use std::ops::Range;

const DEFAULT_MIN_EXTENT: f32 = 0.5;
const DEFAULT_PERCENTILES: (f32, f32) = (0.0, 100.0);

/// Flags cycles whose dynamic range is too small.
///
/// The range of z values over the configured phases tells whether the
/// structure opened at all: a hairpin that never opens shows near-zero
/// extent. Lower bound only, a wide opening is not suspicious.
/// `percentiles` trims the range estimate for robustness; the default
/// `(0, 100)` is a plain max - min.
///
/// A cycle with no finite values takes the sentinel `f32::MAX` and always
/// registers as a lower-bound violation rather than silently passing.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtentRule {
    pub min_extent: f32,
    pub percentiles: (f32, f32),
}

impl Default for ExtentRule {
    fn default() -> Self {
        Self {
            min_extent: DEFAULT_MIN_EXTENT,
            percentiles: DEFAULT_PERCENTILES,
        }
    }
}

impl ExtentRule {
    pub fn name(&self) -> &'static str {
        "extent"
    }

    pub fn evaluate(&self, bead: &[f32], spans: &[Range<usize>]) -> Result<Partial, BqcError> {
        check_spans(bead.len(), spans)?;
        let mut empty = Vec::new();
        let values: Vec<f32> = spans
            .iter()
            .enumerate()
            .map(|(cycle, span)| {
                let ext = nan_extent(&bead[span.clone()], self.percentiles);
                if ext.is_nan() {
                    empty.push(cycle as u32);
                    f32::MAX
                } else {
                    ext
                }
            })
            .collect();
        let mut partial = bound_partial(self.name(), values, Some(self.min_extent), None);
        if !empty.is_empty() {
            let mut min = partial.min;
            min.extend(empty);
            min.sort_unstable();
            min.dedup();
            partial = Partial::new(self.name(), partial.values, min, partial.max);
        }
        Ok(partial)
    }
}

#[cfg(test)]
mod tests {
    use super::ExtentRule;

    fn step_bead(levels: &[(f32, f32)]) -> Vec<f32> {
        // each cycle: 10 samples at lo, 10 at hi
        let mut bead = Vec::new();
        for &(lo, hi) in levels {
            bead.extend(std::iter::repeat_n(lo, 10));
            bead.extend(std::iter::repeat_n(hi, 10));
        }
        bead
    }

    fn spans(ncycles: usize) -> Vec<std::ops::Range<usize>> {
        (0..ncycles).map(|c| c * 20..(c + 1) * 20).collect()
    }

    #[test]
    fn only_the_small_range_violates_wide_openings_pass() {
        let bead = step_bead(&[(0.1, 1.1), (0.5, 0.6), (-2.0, 0.6)]);
        let partial = ExtentRule::default()
            .evaluate(&bead, &spans(3))
            .expect("spans should be valid");
        assert_eq!(partial.name, "extent");
        assert_eq!(partial.min, vec![1]);
        // no upper bound: the 2.6-range cycle is fine
        assert_eq!(partial.max, vec![]);
    }

    #[test]
    fn all_nan_cycle_takes_the_sentinel_and_fails_the_lower_bound() {
        let mut bead = step_bead(&[(0.1, 1.1), (0.1, 1.1)]);
        for v in &mut bead[20..40] {
            *v = f32::NAN;
        }
        let strict = ExtentRule {
            min_extent: 1.0e-9,
            ..ExtentRule::default()
        };
        let partial = strict
            .evaluate(&bead, &spans(2))
            .expect("spans should be valid");
        assert_eq!(partial.values[1], f32::MAX);
        assert!(
            partial.min.contains(&1),
            "sentinel cycle must fail the lower bound regardless of threshold"
        );
        assert_eq!(partial.max, vec![]);
    }

    #[test]
    fn percentile_trim_ignores_lone_spikes() {
        let mut bead = vec![0.0_f32; 100];
        for v in &mut bead[50..] {
            *v = 1.0;
        }
        bead[10] = 50.0;
        let trimmed = ExtentRule {
            percentiles: (5.0, 95.0),
            ..ExtentRule::default()
        };
        let partial = trimmed
            .evaluate(&bead, &[0..100])
            .expect("spans should be valid");
        assert!(partial.values[0] < 1.5, "got {}", partial.values[0]);
        assert!(partial.is_clean());
    }
}
