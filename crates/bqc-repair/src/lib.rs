// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! In-place repair of instrument artifacts in one bead's raw signal.
//!
//! Every filter mutates the sample array it is given, replacing bad samples
//! with NaN (or clamping them), and never changes the array length. None of
//! them can fail: a fully repaired array is always produced, possibly with
//! more NaNs than before.

pub mod clipper;
pub mod constant;
pub mod density;
pub mod islands;
pub mod pipeline;

pub use clipper::AberrantValueFilter;
pub use constant::ConstantRunFilter;
pub use density::NanNeighborhoodFilter;
pub use islands::DerivativeIslandFilter;
pub use pipeline::RepairPipeline;
