// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{BeadRejection, CleaningConfig, CleaningError, DataCleaning, ReportRow};
use bqc_core::{BeadId, BeadSource, BqcError, Partial, PhaseTable, finite_count};
use std::collections::HashMap;

/// What one evaluation of a bead decided, kept so later passes with the same
/// configuration are O(1).
///
/// `partials` is `None` when the bead died on raw population grounds before
/// the cycle rules ran. The cache is keyed by bead id only; keeping it valid
/// across configuration changes is the owner's job, which is why the cache
/// is always passed in rather than stored here.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub partials: Option<Vec<Partial>>,
    pub discard: bool,
}

/// Caller-owned per-bead cache.
pub type CleaningCache = HashMap<BeadId, CacheEntry>;

/// Everything a track-level cleaning pass produced.
#[derive(Clone, Debug, Default)]
pub struct TrackOutcome {
    pub cleaned: Vec<(BeadId, Vec<f32>)>,
    pub rejections: Vec<BeadRejection>,
}

impl TrackOutcome {
    /// Tabular summary of every rejection, ready for rendering.
    pub fn report(&self) -> Vec<ReportRow> {
        self.rejections
            .iter()
            .flat_map(BeadRejection::report_rows)
            .collect()
    }
}

/// Drives [`DataCleaning`] against beads, caching each verdict.
#[derive(Clone, Debug)]
pub struct CleaningProcessor {
    cleaning: DataCleaning,
}

impl CleaningProcessor {
    pub fn new(config: CleaningConfig) -> Self {
        Self {
            cleaning: DataCleaning::new(config),
        }
    }

    pub fn config(&self) -> &CleaningConfig {
        self.cleaning.config()
    }

    /// Cleans one bead in place.
    ///
    /// On success the signal has been repaired and every frame of every bad
    /// cycle nulled, length untouched. On rejection the signal must be
    /// considered unusable. Structural errors abort without caching.
    pub fn clean_bead(
        &self,
        cache: &mut CleaningCache,
        phases: &PhaseTable,
        bead: BeadId,
        lineage: &str,
        signal: &mut [f32],
    ) -> Result<(), CleaningError> {
        if signal.len() != phases.nframes() {
            return Err(BqcError::invalid_input(format!(
                "bead {bead} has {} samples but the phase table spans {} frames",
                signal.len(),
                phases.nframes()
            ))
            .into());
        }

        if let Some(entry) = cache.get(&bead) {
            if entry.discard {
                return Err(self.reject(bead, lineage, phases, entry.partials.clone()));
            }
            let bad = DataCleaning::bad_cycles(entry.partials.as_deref());
            null_cycles(signal, phases, &bad);
            return Ok(());
        }

        let mut partials = self.cleaning.pre_partials(signal, phases)?;
        if self.cleaning.aberrant(signal, false) {
            let partials = (!partials.is_empty()).then_some(partials);
            cache.insert(
                bead,
                CacheEntry {
                    partials: partials.clone(),
                    discard: true,
                },
            );
            return Err(self.reject(bead, lineage, phases, partials));
        }

        partials.extend(self.cleaning.cycle_partials(signal, phases)?);

        let bad = DataCleaning::bad_cycles(Some(&partials));
        let mut discard = false;
        if !bad.is_empty() {
            null_cycles(signal, phases, &bad);
            let min_population = f64::from(self.config().population.min_population);
            discard =
                finite_count(signal) as f64 * 100.0 <= signal.len() as f64 * min_population;
        }

        cache.insert(
            bead,
            CacheEntry {
                partials: Some(partials.clone()),
                discard,
            },
        );
        if discard {
            Err(self.reject(bead, lineage, phases, Some(partials)))
        } else {
            Ok(())
        }
    }

    /// Cleans every bead of a track against one cache, splitting survivors
    /// from rejections. Structural errors abort the whole pass.
    pub fn clean_track(
        &self,
        source: &dyn BeadSource,
        cache: &mut CleaningCache,
    ) -> Result<TrackOutcome, BqcError> {
        let phases = source.phase_table();
        let mut outcome = TrackOutcome::default();
        for bead in source.bead_ids() {
            let mut signal = source.raw_signal(bead)?;
            match self.clean_bead(cache, phases, bead, source.label(), &mut signal) {
                Ok(()) => outcome.cleaned.push((bead, signal)),
                Err(CleaningError::Rejected(rejection)) => outcome.rejections.push(*rejection),
                Err(CleaningError::Invalid(err)) => return Err(err),
            }
        }
        Ok(outcome)
    }

    fn reject(
        &self,
        bead: BeadId,
        lineage: &str,
        phases: &PhaseTable,
        partials: Option<Vec<Partial>>,
    ) -> CleaningError {
        CleaningError::Rejected(Box::new(BeadRejection {
            bead,
            lineage: lineage.to_string(),
            ncycles: phases.ncycles(),
            partials,
            config: self.config().clone(),
        }))
    }
}

/// Overwrites every frame of the listed cycles with NaN; frames are never
/// removed, so the array keeps its length.
fn null_cycles(signal: &mut [f32], phases: &PhaseTable, bad: &[u32]) {
    for &cycle in bad {
        let cycle = cycle as usize;
        if cycle < phases.ncycles() {
            for v in &mut signal[phases.cycle_span(cycle)] {
                *v = f32::NAN;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CleaningCache, null_cycles};
    use bqc_core::PhaseTable;

    #[test]
    fn null_cycles_wipes_whole_cycles_and_nothing_else() {
        let phases = PhaseTable::uniform(&[0, 3], 3, 10).expect("table should be valid");
        let mut signal: Vec<f32> = (0..30).map(|i| i as f32).collect();
        null_cycles(&mut signal, &phases, &[1]);
        assert!(signal[10..20].iter().all(|v| v.is_nan()));
        assert!(signal[..10].iter().all(|v| v.is_finite()));
        assert!(signal[20..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn null_cycles_ignores_out_of_range_indices() {
        let phases = PhaseTable::uniform(&[0, 3], 2, 10).expect("table should be valid");
        let mut signal = vec![1.0_f32; 20];
        null_cycles(&mut signal, &phases, &[7]);
        assert!(signal.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn cache_type_is_an_ordinary_map() {
        let cache: CleaningCache = CleaningCache::new();
        assert!(cache.is_empty());
    }
}
