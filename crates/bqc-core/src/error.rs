// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors surfaced by the quality-control engine.
///
/// These are caller/data-contract violations, not data-quality verdicts:
/// a bead failing the cleaning rules is reported through the processor's
/// rejection type, never through `BqcError`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BqcError {
    /// Malformed input: bad shapes, out-of-range spans, invalid thresholds.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Inconsistent phase-boundary structure for one bead's track.
    #[error("phase layout error: {0}")]
    PhaseLayout(String),
}

impl BqcError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn phase_layout(msg: impl Into<String>) -> Self {
        Self::PhaseLayout(msg.into())
    }
}
