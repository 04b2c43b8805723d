// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Span validation and the shared bound-checking step.

use bqc_core::{BqcError, Partial};
use std::borrow::Cow;
use std::ops::Range;

/// Rejects spans that do not fit the bead array. Rules receive spans from a
/// validated phase table, so a failure here means the caller mixed up beads
/// and tables; that is a contract violation and must abort loudly.
pub fn check_spans(bead_len: usize, spans: &[Range<usize>]) -> Result<(), BqcError> {
    for (cycle, span) in spans.iter().enumerate() {
        if span.start > span.end || span.end > bead_len {
            return Err(BqcError::invalid_input(format!(
                "cycle {cycle} span {}..{} does not fit a bead of {bead_len} samples",
                span.start, span.end
            )));
        }
    }
    Ok(())
}

/// Builds a [`Partial`] from per-cycle statistics: cycles with a value
/// `<= min_bound` violate the lower bound, `>= max_bound` the upper one.
/// NaN values compare false on both sides and so violate nothing.
pub fn bound_partial(
    name: impl Into<Cow<'static, str>>,
    values: Vec<f32>,
    min_bound: Option<f32>,
    max_bound: Option<f32>,
) -> Partial {
    let collect = |bound: Option<f32>, high: bool| -> Vec<u32> {
        match bound {
            None => Vec::new(),
            Some(bound) => values
                .iter()
                .enumerate()
                .filter(|&(_, &v)| if high { v >= bound } else { v <= bound })
                .map(|(idx, _)| idx as u32)
                .collect(),
        }
    };
    let min = collect(min_bound, false);
    let max = collect(max_bound, true);
    Partial::new(name, values, min, max)
}
