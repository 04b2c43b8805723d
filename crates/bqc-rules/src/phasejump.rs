// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bounds::{bound_partial, check_spans};
use bqc_core::{BqcError, Partial};
use std::ops::Range;

const DEFAULT_PHASE_JUMP_HEIGHT: f32 = 1.4;
const DEFAULT_DELTA: f32 = 0.4;
const DEFAULT_MAX_PHASE_JUMPS: f32 = 1.0;

/// Flags cycles containing interferometric phase jumps.
///
/// When two fringes get too close, tracking a fringe can slip by 2π, which
/// shows up as a ~1.4 z-unit step, often as a rapid burst of spikes. The
/// statistic counts absolute discrete derivatives falling inside
/// `(phase_jump_height - delta, phase_jump_height + delta)`. Only relevant
/// for instruments with an interferometric z readout, so the rule is
/// opt-in; it must see the raw signal, before the repair pass flattens the
/// spikes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseJumpRule {
    pub phase_jump_height: f32,
    pub delta: f32,
    pub max_phase_jumps: f32,
}

impl Default for PhaseJumpRule {
    fn default() -> Self {
        Self {
            phase_jump_height: DEFAULT_PHASE_JUMP_HEIGHT,
            delta: DEFAULT_DELTA,
            max_phase_jumps: DEFAULT_MAX_PHASE_JUMPS,
        }
    }
}

impl PhaseJumpRule {
    pub fn name(&self) -> &'static str {
        "phasejump"
    }

    pub fn evaluate(&self, bead: &[f32], spans: &[Range<usize>]) -> Result<Partial, BqcError> {
        check_spans(bead.len(), spans)?;
        let lo = self.phase_jump_height - self.delta;
        let hi = self.phase_jump_height + self.delta;
        let values: Vec<f32> = spans
            .iter()
            .map(|span| {
                bead[span.clone()]
                    .windows(2)
                    .filter(|w| {
                        let diff = (w[1] - w[0]).abs();
                        lo < diff && diff < hi
                    })
                    .count() as f32
            })
            .collect();
        Ok(bound_partial(
            self.name(),
            values,
            None,
            Some(self.max_phase_jumps),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::PhaseJumpRule;

    #[test]
    fn fringe_slips_are_counted_and_flagged() {
        let mut bead = vec![0.0_f32; 60];
        bead[10] = 1.4; // up and back down: two in-window derivatives
        let partial = PhaseJumpRule::default()
            .evaluate(&bead, &[0..30, 30..60])
            .expect("spans should be valid");
        assert_eq!(partial.name, "phasejump");
        assert_eq!(partial.values, vec![2.0, 0.0]);
        assert_eq!(partial.max, vec![0]);
        assert_eq!(partial.min, vec![]);
    }

    #[test]
    fn steps_outside_the_window_do_not_count() {
        let mut bead = vec![0.0_f32; 30];
        for v in &mut bead[15..] {
            *v = 0.5; // ordinary opening step, far below the window
        }
        bead[5] = 4.0; // a spike far above it
        let partial = PhaseJumpRule::default()
            .evaluate(&bead, &[0..30])
            .expect("spans should be valid");
        assert_eq!(partial.values, vec![0.0]);
        assert!(partial.is_clean());
    }

    #[test]
    fn nan_derivatives_are_ignored() {
        let mut bead = vec![0.0_f32; 30];
        bead[10] = f32::NAN;
        let partial = PhaseJumpRule::default()
            .evaluate(&bead, &[0..30])
            .expect("spans should be valid");
        assert_eq!(partial.values, vec![0.0]);
    }
}
