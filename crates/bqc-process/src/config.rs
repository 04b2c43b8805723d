// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use bqc_core::PhaseRange;
use bqc_repair::RepairPipeline;
use bqc_rules::{
    ExtentRule, HfSigmaRule, PhaseJumpRule, PingPongRule, PopulationRule, SaturationRule,
};

/// Every threshold of one cleaning pass, flat and caller-owned.
///
/// Each rule reads its own thresholds plus the phase range it slices cycles
/// by; nothing is looked up dynamically. `population.min_population` does
/// triple duty, as in the instrument software this models: it bounds the
/// per-cycle good-point percentage, the post-repair whole-bead population
/// and the re-check after bad cycles are nulled.
///
/// `phase_jump` is opt-in: only instruments with an interferometric z
/// readout produce the jumps it looks for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CleaningConfig {
    pub repair: RepairPipeline,
    pub hf_sigma: HfSigmaRule,
    pub population: PopulationRule,
    pub extent: ExtentRule,
    pub ping_pong: PingPongRule,
    pub phase_jump: Option<PhaseJumpRule>,
    pub saturation: SaturationRule,
    pub hf_sigma_phases: PhaseRange,
    pub population_phases: PhaseRange,
    pub extent_phases: PhaseRange,
    pub ping_pong_phases: PhaseRange,
    pub phase_jump_phases: PhaseRange,
    pub saturation_phases: PhaseRange,
}
