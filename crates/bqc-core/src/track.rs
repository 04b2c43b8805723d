// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{BqcError, PhaseTable};

/// Identifier of one tracked bead within a track file.
pub type BeadId = usize;

/// Seam to the external track/frame abstraction.
///
/// The cleaning engine only ever asks a track for raw per-frame positions
/// and for the phase-boundary table; file formats, lazy loading and cycle
/// views stay on the other side of this trait.
pub trait BeadSource {
    /// Beads available in this track, in iteration order.
    fn bead_ids(&self) -> Vec<BeadId>;

    /// A fresh copy of the bead's raw sample array, one `f32` per frame.
    fn raw_signal(&self, bead: BeadId) -> Result<Vec<f32>, BqcError>;

    /// Phase boundaries shared by every bead of the track.
    fn phase_table(&self) -> &PhaseTable;

    /// Human-readable lineage ("which track produced this bead"), used in
    /// rejection messages.
    fn label(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::{BeadId, BeadSource};
    use crate::{BqcError, PhaseTable};

    struct OneBeadTrack {
        phases: PhaseTable,
        signal: Vec<f32>,
    }

    impl BeadSource for OneBeadTrack {
        fn bead_ids(&self) -> Vec<BeadId> {
            vec![0]
        }

        fn raw_signal(&self, bead: BeadId) -> Result<Vec<f32>, BqcError> {
            if bead != 0 {
                return Err(BqcError::invalid_input(format!("unknown bead {bead}")));
            }
            Ok(self.signal.clone())
        }

        fn phase_table(&self) -> &PhaseTable {
            &self.phases
        }

        fn label(&self) -> &str {
            "memory-track"
        }
    }

    #[test]
    fn trait_object_round_trips_signal_and_errors_on_unknown_bead() {
        let track = OneBeadTrack {
            phases: PhaseTable::uniform(&[0, 2], 2, 5).expect("table should be valid"),
            signal: vec![0.5; 10],
        };
        let source: &dyn BeadSource = &track;
        assert_eq!(source.bead_ids(), vec![0]);
        assert_eq!(
            source.raw_signal(0).expect("bead 0 should exist"),
            vec![0.5; 10]
        );
        assert!(source.raw_signal(7).is_err());
        assert_eq!(source.label(), "memory-track");
    }
}
