// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bounds::{bound_partial, check_spans};
use bqc_core::{BqcError, Partial, finite_count};
use std::ops::Range;

const DEFAULT_MIN_POPULATION: f32 = 80.0;

/// Flags cycles with too few good points.
///
/// Good points are finite samples, i.e. everything the repair filters did
/// not null. The statistic is the percentage of good points over the
/// configured phase range; an empty range counts as zero. Lower bound only.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulationRule {
    pub min_population: f32,
}

impl Default for PopulationRule {
    fn default() -> Self {
        Self {
            min_population: DEFAULT_MIN_POPULATION,
        }
    }
}

impl PopulationRule {
    pub fn name(&self) -> &'static str {
        "population"
    }

    pub fn evaluate(&self, bead: &[f32], spans: &[Range<usize>]) -> Result<Partial, BqcError> {
        check_spans(bead.len(), spans)?;
        let values: Vec<f32> = spans
            .iter()
            .map(|span| {
                if span.is_empty() {
                    0.0
                } else {
                    let slice = &bead[span.clone()];
                    finite_count(slice) as f32 / slice.len() as f32 * 100.0
                }
            })
            .collect();
        Ok(bound_partial(
            self.name(),
            values,
            Some(self.min_population),
            None,
        ))
    }
}
