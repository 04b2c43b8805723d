// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

const DEFAULT_MIN_DELTA: f32 = 1.0e-6;
const DEFAULT_MIN_RUN: usize = 3;

/// Nulls runs of samples where the signal got stuck.
///
/// A run is a maximal stretch in which every pair of consecutive finite
/// samples differs by less than `min_delta`; NaN samples inside the stretch
/// neither break it nor end it, and count toward its length. Runs spanning
/// `min_run` or more positions are nulled in full. A stale value repeated by
/// the tracking algorithm is the classic producer of such runs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRunFilter {
    pub min_delta: f32,
    pub min_run: usize,
}

impl Default for ConstantRunFilter {
    fn default() -> Self {
        Self {
            min_delta: DEFAULT_MIN_DELTA,
            min_run: DEFAULT_MIN_RUN,
        }
    }
}

impl ConstantRunFilter {
    pub fn apply(&self, signal: &mut [f32]) {
        if self.min_run < 2 {
            return;
        }

        // (start, last) of the active run, indices of finite samples
        let mut run: Option<(usize, usize)> = None;
        let mut prev: Option<(usize, f32)> = None;

        for i in 0..signal.len() {
            let v = signal[i];
            if !v.is_finite() {
                continue;
            }
            match prev {
                Some((prev_idx, prev_val)) if (v - prev_val).abs() < self.min_delta => {
                    run = Some(match run {
                        Some((start, _)) => (start, i),
                        None => (prev_idx, i),
                    });
                }
                _ => {
                    self.flush(signal, run.take());
                }
            }
            prev = Some((i, v));
        }
        self.flush(signal, run);
    }

    fn flush(&self, signal: &mut [f32], run: Option<(usize, usize)>) {
        if let Some((start, last)) = run {
            if last - start + 1 >= self.min_run {
                for v in &mut signal[start..=last] {
                    *v = f32::NAN;
                }
            }
        }
    }
}
