// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Orchestration of the cleaning pass: one [`DataCleaning`] aggregator
//! combining the repair filters with every cycle rule, and a
//! [`CleaningProcessor`] that drives it against a track, caches per-bead
//! outcomes and turns a failed bead into a structured [`BeadRejection`].

pub mod cleaning;
pub mod config;
pub mod processor;
pub mod rejection;

pub use cleaning::DataCleaning;
pub use config::CleaningConfig;
pub use processor::{CacheEntry, CleaningCache, CleaningProcessor, TrackOutcome};
pub use rejection::{BeadRejection, CleaningError, ReportRow, RuleViolation};
