// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use bqc_core::nan_median;

const DEFAULT_MAX_ABS_VALUE: f32 = 5.0;
const DEFAULT_MAX_DERIVATIVE: f32 = 0.6;

/// Detects aberrant samples and either nulls or clamps them.
///
/// With `med` the median of the finite samples, a sample `x[n]` is aberrant
/// when either:
///
/// * `|x[n] - med| > max_abs_value`, or
/// * `|(p + q)/2 - x[n]| > max_derivative`, with `p`/`q` the previous/next
///   finite samples (the first and last finite samples only take the
///   absolute test).
///
/// Detection runs over a snapshot of the input, so replacements made during
/// one pass never feed back into the tests of the same pass. Aberrant
/// samples become NaN when `clip` is true; otherwise each is replaced by the
/// nearer of `med + max_abs_value` and `med - max_abs_value`, which keeps
/// the array NaN-free for later derivative-based tests.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AberrantValueFilter {
    pub max_abs_value: f32,
    pub max_derivative: f32,
}

impl Default for AberrantValueFilter {
    fn default() -> Self {
        Self {
            max_abs_value: DEFAULT_MAX_ABS_VALUE,
            max_derivative: DEFAULT_MAX_DERIVATIVE,
        }
    }
}

impl AberrantValueFilter {
    pub fn apply(&self, signal: &mut [f32], clip: bool) {
        let med = nan_median(signal);
        if !med.is_finite() {
            return;
        }

        let finite: Vec<usize> = (0..signal.len())
            .filter(|&i| signal[i].is_finite())
            .collect();

        let mut flagged = Vec::new();
        for (k, &idx) in finite.iter().enumerate() {
            let v = signal[idx];
            let mut aberrant = (v - med).abs() > self.max_abs_value;
            if !aberrant && k > 0 && k + 1 < finite.len() {
                let p = signal[finite[k - 1]];
                let q = signal[finite[k + 1]];
                aberrant = (0.5 * (p + q) - v).abs() > self.max_derivative;
            }
            if aberrant {
                flagged.push(idx);
            }
        }

        for idx in flagged {
            signal[idx] = if clip {
                f32::NAN
            } else if signal[idx] >= med {
                med + self.max_abs_value
            } else {
                med - self.max_abs_value
            };
        }
    }
}
