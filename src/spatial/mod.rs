//! Spatial geometry for overlapping-pattern neighborhoods
//!
//! This module contains the offset table shared by the compatibility oracle
//! and the propagator: every displacement at which two N×N patterns can
//! overlap, plus neighbor arithmetic on the output grid.

/// Overlap offset enumeration and neighbor lookup
pub mod offsets;

pub use offsets::OffsetTable;
