// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{
    AberrantValueFilter, ConstantRunFilter, DerivativeIslandFilter, NanNeighborhoodFilter,
};

/// The fixed repair sequence applied to a raw bead signal.
///
/// Order matters: the clipper runs first so that, in clip mode, the NaNs it
/// creates feed the neighborhood and island tests that follow.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RepairPipeline {
    pub clipper: AberrantValueFilter,
    pub constant_run: ConstantRunFilter,
    pub nan_neighborhood: NanNeighborhoodFilter,
    pub islands: DerivativeIslandFilter,
}

impl RepairPipeline {
    pub fn repair(&self, signal: &mut [f32], clip: bool) {
        self.clipper.apply(signal, clip);
        self.constant_run.apply(signal);
        self.nan_neighborhood.apply(signal);
        self.islands.apply(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::RepairPipeline;

    #[test]
    fn stuck_stretch_and_spike_are_both_repaired() {
        let mut signal: Vec<f32> = (0..300)
            .map(|i| 0.1 + 0.002 * (i % 5) as f32)
            .collect();
        for v in &mut signal[40..60] {
            *v = 0.42; // tracker re-emitting a stale value
        }
        signal[150] = 80.0;

        let len_before = signal.len();
        RepairPipeline::default().repair(&mut signal, false);

        assert_eq!(signal.len(), len_before);
        assert!(signal[40..60].iter().all(|v| v.is_nan()));
        // the spike never survives: clamped to the bound, and possibly
        // nulled afterwards when the clamped plateau reads as stuck
        assert!(signal[150].is_nan() || signal[150] < 6.0);
    }

    #[test]
    fn clip_mode_feeds_new_nans_into_the_neighborhood_filters() {
        let mut signal: Vec<f32> = (0..300)
            .map(|i| 0.1 + 0.002 * (i % 5) as f32)
            .collect();
        // a burst of spikes dense enough that, once clipped, the survivors
        // in between sit in a NaN-dense neighborhood
        for i in (100..140).step_by(2) {
            signal[i] = 50.0;
        }
        RepairPipeline::default().repair(&mut signal, true);
        let nans = signal[100..140].iter().filter(|v| v.is_nan()).count();
        assert!(nans > 20, "expected the burst region to collapse, got {nans}");
    }

    #[test]
    fn clean_signal_passes_through_untouched() {
        let original: Vec<f32> = (0..200)
            .map(|i| 0.1 + 0.002 * (i % 7) as f32)
            .collect();
        let mut signal = original.clone();
        RepairPipeline::default().repair(&mut signal, false);
        assert_eq!(signal, original);
    }
}
