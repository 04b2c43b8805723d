// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bounds::{bound_partial, check_spans};
use bqc_core::{BqcError, Partial, hf_sigma};
use std::ops::Range;

const DEFAULT_MIN_HF_SIGMA: f32 = 1.0e-4;
const DEFAULT_MAX_HF_SIGMA: f32 = 1.0e-2;

/// Flags cycles with too low or too high a high-frequency variability.
///
/// The variability is the median absolute point-to-point derivative over the
/// configured phase range. Too low means the tracker silently re-emitted a
/// previous position instead of computing a fresh one; too high means excess
/// Brownian motion, typically amplified by an off-center bead rocking around
/// its magnetization axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HfSigmaRule {
    pub min_hf_sigma: f32,
    pub max_hf_sigma: f32,
}

impl Default for HfSigmaRule {
    fn default() -> Self {
        Self {
            min_hf_sigma: DEFAULT_MIN_HF_SIGMA,
            max_hf_sigma: DEFAULT_MAX_HF_SIGMA,
        }
    }
}

impl HfSigmaRule {
    pub fn name(&self) -> &'static str {
        "hfsigma"
    }

    pub fn evaluate(&self, bead: &[f32], spans: &[Range<usize>]) -> Result<Partial, BqcError> {
        check_spans(bead.len(), spans)?;
        let values: Vec<f32> = spans
            .iter()
            .map(|span| hf_sigma(&bead[span.clone()]))
            .collect();
        Ok(bound_partial(
            self.name(),
            values,
            Some(self.min_hf_sigma),
            Some(self.max_hf_sigma),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::HfSigmaRule;

    #[test]
    fn stuck_cycle_hits_the_lower_bound() {
        let mut bead = vec![0.5_f32; 40];
        for (i, v) in bead[20..].iter_mut().enumerate() {
            *v = 0.5 + 0.001 * (i % 3) as f32;
        }
        let partial = HfSigmaRule::default()
            .evaluate(&bead, &[0..20, 20..40])
            .expect("spans should be valid");
        assert_eq!(partial.name, "hfsigma");
        assert_eq!(partial.min, vec![0]);
        assert_eq!(partial.max, vec![]);
    }

    #[test]
    fn wild_cycle_hits_the_upper_bound() {
        let bead: Vec<f32> = (0..40)
            .map(|i| if i < 20 { 0.001 * (i % 2) as f32 } else { 0.5 * (i % 2) as f32 })
            .collect();
        let partial = HfSigmaRule::default()
            .evaluate(&bead, &[0..20, 20..40])
            .expect("spans should be valid");
        assert_eq!(partial.min, vec![]);
        assert_eq!(partial.max, vec![1]);
    }

    #[test]
    fn all_nan_cycle_violates_nothing() {
        let mut bead = vec![0.2_f32; 20];
        bead[0] = 0.21;
        bead[2] = 0.22;
        for v in &mut bead[10..20] {
            *v = f32::NAN;
        }
        let partial = HfSigmaRule::default()
            .evaluate(&bead, &[0..10, 10..20])
            .expect("spans should be valid");
        assert!(partial.values[1].is_nan());
        assert_eq!(partial.min, vec![0]); // the flat first cycle is stuck
        assert_eq!(partial.max, vec![]);
    }

    #[test]
    fn out_of_bounds_span_is_a_structural_error() {
        let bead = vec![0.0_f32; 10];
        assert!(HfSigmaRule::default().evaluate(&bead, &[0..11]).is_err());
    }
}
