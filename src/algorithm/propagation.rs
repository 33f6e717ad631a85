//! Arc-consistency propagation over the elimination worklist
//!
//! Every elimination recorded by `Wave::ban` weakens the support of
//! compatible patterns in the surrounding cells. Draining the worklist to a
//! fixpoint restores the invariant that each support counter equals the
//! number of still-possible patterns in the corresponding neighbor that
//! agree on the overlap; a counter reaching zero eliminates its pattern in
//! turn, which may enqueue further work.

use crate::algorithm::wave::Wave;
use crate::analysis::compatibility::CompatibilityOracle;

/// Drain the wave's elimination worklist to a fixpoint
///
/// Returns the number of eliminations performed, which is zero when the
/// wave was already quiescent. Worklist order is FIFO, so for a fixed seed
/// the elimination sequence — and therefore the run — is reproducible.
///
/// # Errors
///
/// Returns `Contradiction` as soon as a cell runs out of patterns; the
/// worklist is left partially drained and the run is over.
pub fn propagate(
    wave: &mut Wave,
    oracle: &CompatibilityOracle,
) -> crate::io::error::Result<usize> {
    let offsets = oracle.offsets();
    let rows = wave.rows();
    let cols = wave.cols();
    let periodic = wave.periodic();

    let mut eliminations = 0;

    while let Some((cell, banned)) = wave.pop_elimination() {
        for d in 0..offsets.len() {
            let Some(neighbor) = offsets.neighbor(cell, d, rows, cols, periodic) else {
                continue;
            };
            let toward_cell = offsets.opposite(d);

            // The elimination at `cell` is one fewer supporter, seen from
            // the neighbor, for every pattern compatible with it there
            for &candidate in oracle.compatible(banned, d) {
                let candidate = usize::from(candidate);
                if !wave.contains(neighbor, candidate) {
                    continue;
                }
                if wave.decrement_support(neighbor, candidate, toward_cell) == 0 {
                    wave.ban(neighbor, candidate)?;
                    eliminations += 1;
                }
            }
        }
    }

    Ok(eliminations)
}
