// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bounds::{bound_partial, check_spans};
use bqc_core::{BqcError, Partial, nan_extent};
use std::ops::Range;

const DEFAULT_MAX_PING_PONG: f32 = 3.0;
const DEFAULT_MIN_DIFFERENCE: f32 = 0.01;
const DEFAULT_PERCENTILES: (f32, f32) = (0.0, 100.0);

/// Flags cycles where the tracker plays ping-pong between beads.
///
/// A passing or close-by bead can capture the tracker, which then switches
/// back and forth, stamping the cycle with repeated full-range swings. The
/// statistic integrates the absolute five-point derivative over the cycle,
/// normalized by the cycle's extent; derivatives below `min_difference` are
/// ordinary noise and do not count. A cycle whose extent is zero or not
/// finite scores NaN. Upper bound only: a quiet cycle is not suspicious.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PingPongRule {
    pub max_ping_pong: f32,
    pub min_difference: f32,
    pub percentiles: (f32, f32),
}

impl Default for PingPongRule {
    fn default() -> Self {
        Self {
            max_ping_pong: DEFAULT_MAX_PING_PONG,
            min_difference: DEFAULT_MIN_DIFFERENCE,
            percentiles: DEFAULT_PERCENTILES,
        }
    }
}

impl PingPongRule {
    pub fn name(&self) -> &'static str {
        "pingpong"
    }

    pub fn evaluate(&self, bead: &[f32], spans: &[Range<usize>]) -> Result<Partial, BqcError> {
        check_spans(bead.len(), spans)?;
        let values: Vec<f32> = spans
            .iter()
            .map(|span| self.swing_integral(&bead[span.clone()]))
            .collect();
        Ok(bound_partial(
            self.name(),
            values,
            None,
            Some(self.max_ping_pong),
        ))
    }

    fn swing_integral(&self, cycle: &[f32]) -> f32 {
        let ext = nan_extent(cycle, self.percentiles);
        if !ext.is_finite() || ext == 0.0 {
            return f32::NAN;
        }
        let inv = 1.0 / f64::from(ext);
        let mut total = 0.0_f64;
        for i in 4..cycle.len() {
            let five_point = f64::from(cycle[i] - cycle[i - 4]) / 12.0
                + f64::from(cycle[i - 3] - cycle[i - 1]) * (2.0 / 3.0);
            let magnitude = five_point.abs();
            if magnitude.is_finite() && magnitude > f64::from(self.min_difference) {
                total += magnitude * inv;
            }
        }
        total as f32
    }
}
