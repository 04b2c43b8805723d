// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bounds::check_spans;
use bqc_core::{BqcError, Partial, nan_median};
use std::ops::Range;

const DEFAULT_MAX_SATURATION: f32 = 20.0;
const DEFAULT_MAX_DIST_TO_ZERO: f32 = 0.015;
const DEFAULT_SAT_WINDOW: usize = 10;

/// Flags beads with too many cycles that never come back to baseline.
///
/// Per cycle, the delta is the median over the last `sat_window` frames of
/// the measure span minus the median over the initial span; a cycle
/// saturates when its delta exceeds `max_dist_to_zero`. This happens when
/// the hairpin never closes: the force is too high, a structure blocks the
/// closing, or an oligo blocks the loop.
///
/// Unlike the other rules this is a bead-level veto: only when saturating
/// cycles exceed `max_saturation` percent of the finite-delta cycles does
/// the partial's `max` set carry the saturating cycle indices. Below the
/// threshold the set stays empty even though `values` reports every delta.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturationRule {
    pub max_saturation: f32,
    pub max_dist_to_zero: f32,
    pub sat_window: usize,
}

impl Default for SaturationRule {
    fn default() -> Self {
        Self {
            max_saturation: DEFAULT_MAX_SATURATION,
            max_dist_to_zero: DEFAULT_MAX_DIST_TO_ZERO,
            sat_window: DEFAULT_SAT_WINDOW,
        }
    }
}

impl SaturationRule {
    pub fn name(&self) -> &'static str {
        "saturation"
    }

    pub fn evaluate(
        &self,
        bead: &[f32],
        initial_spans: &[Range<usize>],
        measure_spans: &[Range<usize>],
    ) -> Result<Partial, BqcError> {
        if initial_spans.len() != measure_spans.len() {
            return Err(BqcError::phase_layout(format!(
                "saturation needs matching phase arrays, got {} initial and {} measure cycles",
                initial_spans.len(),
                measure_spans.len()
            )));
        }
        check_spans(bead.len(), initial_spans)?;
        check_spans(bead.len(), measure_spans)?;

        let mut values = vec![f32::NAN; initial_spans.len()];
        let mut saturating = Vec::new();
        let mut finite = 0_usize;

        for (cycle, (initial, measure)) in initial_spans.iter().zip(measure_spans).enumerate() {
            let tail_start = measure.end.saturating_sub(self.sat_window).max(measure.start);
            let tail = nan_median(&bead[tail_start..measure.end]);
            if !tail.is_finite() {
                continue;
            }
            let delta = tail - nan_median(&bead[initial.clone()]);
            values[cycle] = delta;
            if delta.is_finite() {
                finite += 1;
                if delta > self.max_dist_to_zero {
                    saturating.push(cycle as u32);
                }
            }
        }

        let vetoed = saturating.len() as f32 * 100.0 > finite as f32 * self.max_saturation;
        let max = if vetoed { saturating } else { Vec::new() };
        Ok(Partial::new(self.name(), values, Vec::new(), max))
    }
}

#[cfg(test)]
mod tests {
    use super::SaturationRule;
    use std::ops::Range;

    const NCYCLES: usize = 10;

    fn cycle_spans(first: usize, last: usize) -> Vec<Range<usize>> {
        (0..NCYCLES)
            .map(|c| c * 100 + first..c * 100 + last)
            .collect()
    }

    fn baseline() -> Vec<f32> {
        vec![0.1_f32; NCYCLES * 100]
    }

    #[test]
    fn bumps_outside_the_window_report_nothing() {
        let mut bead = baseline();
        for start in (70..1000).step_by(100) {
            for v in &mut bead[start..start + 10] {
                *v += 0.02;
            }
        }
        let partial = SaturationRule::default()
            .evaluate(&bead, &cycle_spans(0, 30), &cycle_spans(50, 90))
            .expect("spans should be valid");
        assert_eq!(partial.name, "saturation");
        assert!(partial.min.is_empty());
        assert!(partial.max.is_empty());
        for &v in &partial.values {
            assert!(v.abs() < 1.0e-4, "delta should be ~0, got {v}");
        }
    }

    #[test]
    fn widespread_saturation_reports_the_saturating_cycles() {
        let mut bead = baseline();
        // cycles 0..8 end their measure phase away from baseline
        for start in (80..800).step_by(100) {
            for v in &mut bead[start..start + 10] {
                *v += 0.02;
            }
        }
        let partial = SaturationRule::default()
            .evaluate(&bead, &cycle_spans(0, 30), &cycle_spans(50, 90))
            .expect("spans should be valid");
        assert_eq!(partial.max, (0..8).collect::<Vec<u32>>());
        assert!(partial.min.is_empty());
    }

    #[test]
    fn deltas_are_reported_even_when_the_veto_does_not_fire() {
        let mut bead = baseline();
        // one big delta out of ten: 10% <= 20%, no veto
        for v in &mut bead[80..90] {
            *v += 0.5;
        }
        let partial = SaturationRule::default()
            .evaluate(&bead, &cycle_spans(0, 30), &cycle_spans(50, 90))
            .expect("spans should be valid");
        assert!(partial.max.is_empty());
        assert!((partial.values[0] - 0.5).abs() < 1.0e-4);
    }

    #[test]
    fn nan_tails_leave_the_cycle_out_of_the_census() {
        let mut bead = baseline();
        for v in &mut bead[80..90] {
            *v = f32::NAN; // cycle 0 tail unusable
        }
        // cycle 1 saturates; 1 of 9 finite = 11% <= 20% -> no veto
        for v in &mut bead[180..190] {
            *v += 0.5;
        }
        let partial = SaturationRule::default()
            .evaluate(&bead, &cycle_spans(0, 30), &cycle_spans(50, 90))
            .expect("spans should be valid");
        assert!(partial.values[0].is_nan());
        assert!(partial.max.is_empty());
    }

    #[test]
    fn mismatched_phase_arrays_are_a_structural_error() {
        let bead = baseline();
        let err = SaturationRule::default()
            .evaluate(&bead, &cycle_spans(0, 30)[..9], &cycle_spans(50, 90))
            .expect_err("mismatched arrays must fail");
        assert!(err.to_string().contains("matching phase arrays"));
    }

    #[test]
    fn short_measure_spans_use_what_they_have() {
        let bead = vec![0.1_f32; 100];
        let partial = SaturationRule::default()
            .evaluate(&bead, &[0..30], &[50..55])
            .expect("short span should not underflow");
        assert!(partial.values[0].abs() < 1.0e-6);
    }
}
