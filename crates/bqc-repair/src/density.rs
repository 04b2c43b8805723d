// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

const DEFAULT_WINDOW: usize = 16;
const DEFAULT_RATIO: f32 = 50.0;

/// Nulls frames trapped between two NaN-dense neighborhoods.
///
/// A frame is untrustworthy even when individually finite if the `window`
/// frames to its left and the `window` frames to its right (one past the
/// frame) each hold NaNs at a density of at least `ratio` percent. Densities
/// are measured on the input state, so nulled frames do not snowball within
/// one pass.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NanNeighborhoodFilter {
    pub window: usize,
    pub ratio: f32,
}

impl Default for NanNeighborhoodFilter {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            ratio: DEFAULT_RATIO,
        }
    }
}

impl NanNeighborhoodFilter {
    pub fn apply(&self, signal: &mut [f32]) {
        let n = signal.len();
        let w = self.window;
        if w == 0 || 2 * w + 1 >= n {
            return;
        }

        let mut prefix = vec![0u32; n + 1];
        for (i, v) in signal.iter().enumerate() {
            prefix[i + 1] = prefix[i] + u32::from(v.is_nan());
        }
        let dense = |start: usize| {
            let nans = prefix[start + w] - prefix[start];
            nans as f32 * 100.0 >= self.ratio * w as f32
        };

        let flagged: Vec<usize> = (w..n - w)
            .filter(|&i| dense(i - w) && dense(i + 1))
            .collect();
        for i in flagged {
            signal[i] = f32::NAN;
        }
    }
}
