// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::CleaningConfig;
use bqc_core::{BqcError, Partial, PhaseRange, PhaseTable, finite_count};

/// Runs the full cleaning pass on one bead: in-place repair, then every
/// cycle rule over its configured phase slices.
///
/// Rules are an explicit, fixed list. The cycle-level rules feed one union,
/// so their relative order does not matter; saturation runs last because it
/// is the only bead-wide verdict.
#[derive(Clone, Debug)]
pub struct DataCleaning {
    config: CleaningConfig,
}

impl DataCleaning {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Repairs the signal in place and decides whether the bead survives on
    /// raw population grounds: `true` means discard, too few finite samples
    /// remain (`<= min_population` percent).
    pub fn aberrant(&self, signal: &mut [f32], clip: bool) -> bool {
        self.config.repair.repair(signal, clip);
        let fraction = finite_count(signal) as f64 * 100.0;
        fraction <= signal.len() as f64 * f64::from(self.config.population.min_population)
    }

    /// Rules that must see the raw signal, before any repair.
    pub fn pre_partials(
        &self,
        signal: &[f32],
        phases: &PhaseTable,
    ) -> Result<Vec<Partial>, BqcError> {
        let mut partials = Vec::new();
        if let Some(rule) = &self.config.phase_jump {
            let spans = phases.phase_spans(self.config.phase_jump_phases)?;
            partials.push(rule.evaluate(signal, &spans)?);
        }
        Ok(partials)
    }

    /// Rules evaluated on the repaired signal.
    pub fn cycle_partials(
        &self,
        signal: &[f32],
        phases: &PhaseTable,
    ) -> Result<Vec<Partial>, BqcError> {
        let config = &self.config;
        let mut partials = Vec::with_capacity(5);

        let spans = phases.phase_spans(config.hf_sigma_phases)?;
        partials.push(config.hf_sigma.evaluate(signal, &spans)?);

        let spans = phases.phase_spans(config.extent_phases)?;
        partials.push(config.extent.evaluate(signal, &spans)?);

        let spans = phases.phase_spans(config.population_phases)?;
        partials.push(config.population.evaluate(signal, &spans)?);

        let spans = phases.phase_spans(config.ping_pong_phases)?;
        partials.push(config.ping_pong.evaluate(signal, &spans)?);

        let initial = phases.phase_spans(PhaseRange::single(config.saturation_phases.first))?;
        let measure = phases.phase_spans(PhaseRange::single(config.saturation_phases.last))?;
        partials.push(config.saturation.evaluate(signal, &initial, &measure)?);

        Ok(partials)
    }

    /// Sorted union of every rule's violation sets.
    pub fn bad_cycles(partials: Option<&[Partial]>) -> Vec<u32> {
        let mut bad: Vec<u32> = partials
            .into_iter()
            .flatten()
            .flat_map(|partial| partial.min.iter().chain(&partial.max).copied())
            .collect();
        bad.sort_unstable();
        bad.dedup();
        bad
    }
}
