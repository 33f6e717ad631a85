//! Exemplar preprocessing: palettization, pattern extraction, compatibility

/// Pairwise pattern-overlap compatibility oracle
pub mod compatibility;
/// Exemplar image loading and palettization
pub mod palette;
/// N×N pattern extraction with symmetry variants and frequency weights
pub mod patterns;

pub use compatibility::CompatibilityOracle;
pub use palette::Exemplar;
pub use patterns::{Pattern, PatternSet, Symmetry};
