// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Per-cycle quality rules.
//!
//! Each rule is a bag of thresholds with sensible defaults. `evaluate` takes
//! one bead's sample array plus the per-cycle frame spans computed from the
//! phase-boundary table and returns a [`Partial`]: the statistic per cycle
//! and the cycle indices violating the rule's bounds. A statistic `<=` the
//! lower bound is a low violation, `>=` the upper bound a high violation;
//! NaN statistics violate nothing.

pub mod bounds;
pub mod extent;
pub mod hfsigma;
pub mod phasejump;
pub mod pingpong;
pub mod population;
pub mod saturation;

pub use bqc_core::Partial;
pub use extent::ExtentRule;
pub use hfsigma::HfSigmaRule;
pub use phasejump::PhaseJumpRule;
pub use pingpong::PingPongRule;
pub use population::PopulationRule;
pub use saturation::SaturationRule;
