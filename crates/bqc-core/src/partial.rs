// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::borrow::Cow;

/// One rule's verdict over every cycle of a bead.
///
/// `values` holds the computed statistic per cycle; `min` and `max` hold the
/// cycle indices violating the rule's lower and upper bound. Created fresh on
/// every rule evaluation and consumed immediately by the aggregator; the only
/// place a `Partial` outlives one evaluation is the processor's cache slot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Partial {
    pub name: Cow<'static, str>,
    pub min: Vec<u32>,
    pub max: Vec<u32>,
    pub values: Vec<f32>,
}

impl Partial {
    /// Builds a partial, checking that every violation index points into
    /// `values` and that both index sets are sorted.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        values: Vec<f32>,
        min: Vec<u32>,
        max: Vec<u32>,
    ) -> Self {
        let ncycles = values.len();
        for set in [&min, &max] {
            assert!(
                set.iter().all(|&idx| (idx as usize) < ncycles),
                "violation index out of range for {ncycles} cycles"
            );
            assert!(
                set.windows(2).all(|pair| pair[0] < pair[1]),
                "violation indices must be strictly increasing"
            );
        }
        Self {
            name: name.into(),
            min,
            max,
            values,
        }
    }

    /// Number of cycles the statistic was computed over.
    pub fn ncycles(&self) -> usize {
        self.values.len()
    }

    /// True when neither bound was violated by any cycle.
    pub fn is_clean(&self) -> bool {
        self.min.is_empty() && self.max.is_empty()
    }
}
