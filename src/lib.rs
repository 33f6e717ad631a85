//! Overlapping wave function collapse texture synthesis
//!
//! The system palettizes a small exemplar image, extracts every N×N pattern
//! together with its observed frequency, and grows a larger output in which
//! each cell holds a superposition of patterns. The superposition is
//! repeatedly collapsed at the lowest-entropy cell and the consequences are
//! propagated to a fixpoint, until every cell is decided or one runs dry.

#![forbid(unsafe_code)]

/// Core solver: wave state, observation, propagation, and the run driver
pub mod algorithm;
/// Exemplar preprocessing: palettization, pattern extraction, compatibility
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Offset geometry for overlapping-pattern neighborhoods
pub mod spatial;

pub use io::error::{Result, SynthesisError};
