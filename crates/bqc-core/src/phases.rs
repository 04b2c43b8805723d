// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::BqcError;
use std::ops::Range;

/// Conventional index of the initial (baseline) phase of a cycle.
pub const PHASE_INITIAL: usize = 1;
/// Conventional index of the pull phase.
pub const PHASE_PULL: usize = 3;
/// Conventional index of the measure phase.
pub const PHASE_MEASURE: usize = 5;

/// Inclusive pair of phase indices a rule computes its statistic over.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseRange {
    pub first: usize,
    pub last: usize,
}

impl PhaseRange {
    pub const fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// A single-phase range.
    pub const fn single(phase: usize) -> Self {
        Self {
            first: phase,
            last: phase,
        }
    }
}

impl Default for PhaseRange {
    fn default() -> Self {
        Self::new(PHASE_INITIAL, PHASE_MEASURE)
    }
}

/// Validated phase-boundary table for one bead's track.
///
/// `starts[cycle * nphases + phase]` is the frame index at which the phase
/// begins. Boundaries are strictly increasing in flattened order, which
/// makes them strictly increasing along both axes; each phase ends where the
/// next one starts, the last phase of a cycle ends at the next cycle's first
/// boundary and the final cycle ends at the track's last frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseTable {
    starts: Vec<usize>,
    ncycles: usize,
    nphases: usize,
    nframes: usize,
}

impl PhaseTable {
    pub fn new(
        starts: Vec<usize>,
        ncycles: usize,
        nphases: usize,
        nframes: usize,
    ) -> Result<Self, BqcError> {
        if ncycles == 0 || nphases == 0 {
            return Err(BqcError::phase_layout(format!(
                "phase table requires ncycles >= 1 and nphases >= 1, got ncycles={ncycles}, nphases={nphases}"
            )));
        }
        let expected = ncycles.checked_mul(nphases).ok_or_else(|| {
            BqcError::phase_layout("ncycles*nphases overflow while validating phase table")
        })?;
        if starts.len() != expected {
            return Err(BqcError::phase_layout(format!(
                "phase table length mismatch: got {}, expected {} (ncycles={}, nphases={})",
                starts.len(),
                expected,
                ncycles,
                nphases
            )));
        }
        if let Some(idx) = starts.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(BqcError::phase_layout(format!(
                "phase boundaries must be strictly increasing: starts[{idx}]={} >= starts[{}]={}",
                starts[idx],
                idx + 1,
                starts[idx + 1]
            )));
        }
        if let Some(&last) = starts.last() {
            if last >= nframes {
                return Err(BqcError::phase_layout(format!(
                    "last phase boundary {last} exceeds track length {nframes}"
                )));
            }
        }
        Ok(Self {
            starts,
            ncycles,
            nphases,
            nframes,
        })
    }

    /// Builds a table with an identical per-cycle boundary layout, cycles of
    /// `cycle_len` frames each.
    pub fn uniform(
        offsets: &[usize],
        ncycles: usize,
        cycle_len: usize,
    ) -> Result<Self, BqcError> {
        let nframes = ncycles.checked_mul(cycle_len).ok_or_else(|| {
            BqcError::phase_layout("ncycles*cycle_len overflow while building phase table")
        })?;
        let mut starts = Vec::with_capacity(offsets.len() * ncycles);
        for cycle in 0..ncycles {
            for &offset in offsets {
                starts.push(cycle * cycle_len + offset);
            }
        }
        Self::new(starts, ncycles, offsets.len(), nframes)
    }

    pub fn ncycles(&self) -> usize {
        self.ncycles
    }

    pub fn nphases(&self) -> usize {
        self.nphases
    }

    pub fn nframes(&self) -> usize {
        self.nframes
    }

    /// First frame of `phase` within `cycle`.
    pub fn start(&self, cycle: usize, phase: usize) -> usize {
        self.starts[cycle * self.nphases + phase]
    }

    /// One past the last frame of `phase` within `cycle`.
    pub fn end(&self, cycle: usize, phase: usize) -> usize {
        let flat = cycle * self.nphases + phase;
        if flat + 1 < self.starts.len() {
            self.starts[flat + 1]
        } else {
            self.nframes
        }
    }

    /// All frames belonging to `cycle`, every phase included.
    pub fn cycle_span(&self, cycle: usize) -> Range<usize> {
        self.start(cycle, 0)..self.end(cycle, self.nphases - 1)
    }

    /// One frame range per cycle covering phases `range.first..=range.last`.
    pub fn phase_spans(&self, range: PhaseRange) -> Result<Vec<Range<usize>>, BqcError> {
        if range.first > range.last || range.last >= self.nphases {
            return Err(BqcError::phase_layout(format!(
                "phase range {}..={} is invalid for a table with {} phases",
                range.first, range.last, self.nphases
            )));
        }
        Ok((0..self.ncycles)
            .map(|cycle| self.start(cycle, range.first)..self.end(cycle, range.last))
            .collect())
    }
}
