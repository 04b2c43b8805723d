// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared types for the bead signal quality-control engine: the error enum,
//! the per-rule [`Partial`] result, the validated phase-boundary table and
//! the seam to the external track abstraction.

pub mod error;
pub mod partial;
pub mod phases;
pub mod stats;
pub mod track;

pub use error::BqcError;
pub use partial::Partial;
pub use phases::{PHASE_INITIAL, PHASE_MEASURE, PHASE_PULL, PhaseRange, PhaseTable};
pub use stats::{finite_count, hf_sigma, nan_extent, nan_median, nan_percentile};
pub use track::{BeadId, BeadSource};
