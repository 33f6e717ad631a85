//! Observation: lowest-entropy cell selection and weighted collapse
//!
//! One observation picks the undecided cell with the smallest entropy (a
//! tiny rng-derived jitter breaks ties deterministically for a fixed seed),
//! samples one of its surviving patterns in proportion to the pattern
//! weights, and eliminates every other pattern there.

use crate::algorithm::wave::Wave;
use crate::io::configuration::ENTROPY_JITTER;
use rand::{rngs::StdRng, Rng};

/// Result of a single observation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// A cell was collapsed to a single pattern
    Decided {
        /// Flat index of the collapsed cell
        cell: usize,
        /// The surviving pattern
        pattern: usize,
    },
    /// Every cell was already decided
    Done,
    /// A cell was found with no possible patterns
    Contradiction {
        /// Flat index of the empty cell
        cell: usize,
    },
}

/// Collapse the lowest-entropy undecided cell
///
/// Decided cells are skipped entirely, so observing a fully decided wave is
/// a no-op that reports `Done`. An empty cell is reported as a
/// contradiction; propagation should have surfaced it already, but the scan
/// checks anyway rather than sampling from nothing.
pub fn observe(wave: &mut Wave, rng: &mut StdRng) -> ObserveOutcome {
    let mut best_cell = None;
    let mut best_entropy = f64::INFINITY;

    for cell in 0..wave.total_cells() {
        match wave.remaining(cell) {
            0 => return ObserveOutcome::Contradiction { cell },
            1 => continue,
            _ => {}
        }

        // The jitter is strictly a tie-breaker between equal-entropy cells
        let noised = wave.entropy(cell) + ENTROPY_JITTER * rng.random::<f64>();
        if noised < best_entropy {
            best_entropy = noised;
            best_cell = Some(cell);
        }
    }

    let Some(cell) = best_cell else {
        return ObserveOutcome::Done;
    };

    let pattern = sample_pattern(wave, cell, rng);

    for other in 0..wave.pattern_count() {
        if other != pattern && wave.contains(cell, other) && wave.ban(cell, other).is_err() {
            // Unreachable while the chosen pattern survives; reported anyway
            return ObserveOutcome::Contradiction { cell };
        }
    }

    ObserveOutcome::Decided { cell, pattern }
}

/// Inverse-CDF sample over a cell's surviving patterns, weighted by frequency
fn sample_pattern(wave: &Wave, cell: usize, rng: &mut StdRng) -> usize {
    let mut remainder = rng.random::<f64>() * wave.sum_weight(cell);
    let mut chosen = 0;

    for pattern in 0..wave.pattern_count() {
        if !wave.contains(cell, pattern) {
            continue;
        }
        chosen = pattern;
        remainder -= wave.pattern_weight(pattern);
        if remainder <= 0.0 {
            break;
        }
    }

    chosen
}
