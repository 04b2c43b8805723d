// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

const DEFAULT_RIVER_WIDTH: usize = 2;
const DEFAULT_ISLAND_WIDTH: usize = 10;
const DEFAULT_RATIO: f32 = 80.0;
const DEFAULT_MAX_DERIVATIVE: f32 = 0.1;

/// Nulls short, noisy islands of samples stranded between NaN stretches.
///
/// Maximal NaN runs of `river_width` or more frames are rivers. The frames
/// between two consecutive rivers form an island when they span
/// `island_width` or fewer positions. An island is nulled when it holds
/// fewer than 3 finite values (too few to judge), or when at least `ratio`
/// percent of its interior finite triples show a centered derivative above
/// `max_derivative`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivativeIslandFilter {
    pub river_width: usize,
    pub island_width: usize,
    pub ratio: f32,
    pub max_derivative: f32,
}

impl Default for DerivativeIslandFilter {
    fn default() -> Self {
        Self {
            river_width: DEFAULT_RIVER_WIDTH,
            island_width: DEFAULT_ISLAND_WIDTH,
            ratio: DEFAULT_RATIO,
            max_derivative: DEFAULT_MAX_DERIVATIVE,
        }
    }
}

impl DerivativeIslandFilter {
    pub fn apply(&self, signal: &mut [f32]) {
        let n = signal.len();
        if self.river_width == 0 || self.river_width > n {
            return;
        }

        let rivers = self.rivers(signal);
        for pair in rivers.windows(2) {
            let island = pair[0].1..pair[1].0;
            if island.is_empty() || island.len() > self.island_width {
                continue;
            }
            let vals: Vec<f32> = signal[island.clone()]
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect();
            if self.is_speck(&vals) {
                for v in &mut signal[island] {
                    *v = f32::NAN;
                }
            }
        }
    }

    /// Maximal NaN runs at least `river_width` long, as `(start, end)` pairs.
    fn rivers(&self, signal: &[f32]) -> Vec<(usize, usize)> {
        let mut rivers = Vec::new();
        let mut start = None;
        for (i, v) in signal.iter().enumerate() {
            if v.is_nan() {
                start.get_or_insert(i);
            } else if let Some(s) = start.take() {
                if i - s >= self.river_width {
                    rivers.push((s, i));
                }
            }
        }
        if let Some(s) = start {
            if signal.len() - s >= self.river_width {
                rivers.push((s, signal.len()));
            }
        }
        rivers
    }

    fn is_speck(&self, vals: &[f32]) -> bool {
        if vals.len() < 3 {
            return true;
        }
        let interior = vals.len() - 2;
        let rough = vals
            .windows(3)
            .filter(|w| (w[1] - 0.5 * (w[0] + w[2])).abs() > self.max_derivative)
            .count();
        rough as f32 * 100.0 >= self.ratio * interior as f32
    }
}
