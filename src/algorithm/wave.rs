//! Mutable superposition state for the output grid
//!
//! Each cell holds the set of patterns still possible there, a support
//! counter per (pattern, offset) pair, and two running sums from which the
//! cell's Shannon entropy is derived in O(1). Eliminations go through `ban`,
//! which keeps every derived quantity consistent and records the elimination
//! on the FIFO worklist the propagator drains.

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::compatibility::CompatibilityOracle;
use crate::analysis::patterns::PatternSet;
use std::collections::VecDeque;

/// Superposition state for every output cell
///
/// All storage is allocated at construction; observation and propagation
/// never allocate. Cells are addressed by flat index `row * cols + col`.
pub struct Wave {
    rows: usize,
    cols: usize,
    pattern_count: usize,
    offset_count: usize,
    periodic: bool,
    /// Per-cell possibility sets
    possibilities: Vec<PatternBitset>,
    /// Per-cell possibility counts (side counter for the bitsets)
    remaining: Vec<usize>,
    /// Flat support counters, indexed `(cell * T + pattern) * D + offset`
    support: Vec<u16>,
    /// Per-cell Σ w_i over possible patterns
    sum_weights: Vec<f64>,
    /// Per-cell Σ w_i · ln w_i over possible patterns
    sum_weight_log_weights: Vec<f64>,
    /// Per-pattern weights as floats
    weights: Vec<f64>,
    /// Per-pattern w · ln w, precomputed once
    weight_log_weights: Vec<f64>,
    /// Pending eliminations awaiting propagation, FIFO
    worklist: VecDeque<(usize, usize)>,
    /// Number of cells with more than one possibility left
    undecided: usize,
}

impl Wave {
    /// Allocate a fresh wave with every pattern possible everywhere
    ///
    /// Support counters are seeded from the oracle's per-offset totals, as
    /// if every cell had a full complement of neighbors; on non-periodic
    /// grids the propagator simply skips the missing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the pattern set is
    /// empty
    pub fn new(
        rows: usize,
        cols: usize,
        patterns: &PatternSet,
        oracle: &CompatibilityOracle,
        periodic: bool,
    ) -> crate::io::error::Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(crate::io::error::invalid_parameter(
                "output dimensions",
                &format!("{rows}x{cols}"),
                &"both dimensions must be positive",
            ));
        }
        if patterns.is_empty() {
            return Err(crate::io::error::SynthesisError::InvalidSourceData {
                reason: "No patterns were extracted from the exemplar".to_string(),
            });
        }

        let pattern_count = patterns.len();
        let offset_count = oracle.offsets().len();
        let cell_count = rows * cols;

        let weights: Vec<f64> = (0..pattern_count)
            .map(|i| f64::from(patterns.weight(i)))
            .collect();
        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| w * w.ln()).collect();

        let total_weight: f64 = weights.iter().sum();
        let total_weight_log_weight: f64 = weight_log_weights.iter().sum();

        let mut seed = vec![0u16; pattern_count * offset_count];
        for i in 0..pattern_count {
            for d in 0..offset_count {
                if let Some(slot) = seed.get_mut(i * offset_count + d) {
                    *slot = oracle.support_total(i, d);
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            pattern_count,
            offset_count,
            periodic,
            possibilities: vec![PatternBitset::full(pattern_count); cell_count],
            remaining: vec![pattern_count; cell_count],
            support: seed.repeat(cell_count),
            sum_weights: vec![total_weight; cell_count],
            sum_weight_log_weights: vec![total_weight_log_weight; cell_count],
            weights,
            weight_log_weights,
            worklist: VecDeque::with_capacity(cell_count * pattern_count),
            undecided: if pattern_count > 1 { cell_count } else { 0 },
        })
    }

    /// Eliminate a pattern from a cell
    ///
    /// Updates the possibility set, the entropy sums, and the decided-cell
    /// count, zeroes the pattern's own support counters, and records the
    /// elimination for propagation. Eliminating a pattern that is already
    /// absent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` when the elimination empties the cell
    pub fn ban(&mut self, cell: usize, pattern: usize) -> crate::io::error::Result<()> {
        let contains = self
            .possibilities
            .get(cell)
            .is_some_and(|set| set.contains(pattern));
        if !contains {
            return Ok(());
        }

        if let Some(set) = self.possibilities.get_mut(cell) {
            set.remove(pattern);
        }
        if let Some(count) = self.remaining.get_mut(cell) {
            *count -= 1;
        }
        if let Some(sum) = self.sum_weights.get_mut(cell) {
            *sum -= self.weights.get(pattern).copied().unwrap_or(0.0);
        }
        if let Some(sum) = self.sum_weight_log_weights.get_mut(cell) {
            *sum -= self.weight_log_weights.get(pattern).copied().unwrap_or(0.0);
        }

        // A banned pattern's own counters must never re-trigger
        let base = (cell * self.pattern_count + pattern) * self.offset_count;
        for slot in self
            .support
            .iter_mut()
            .skip(base)
            .take(self.offset_count)
        {
            *slot = 0;
        }

        self.worklist.push_back((cell, pattern));

        match self.remaining.get(cell).copied().unwrap_or(0) {
            0 => Err(crate::io::error::SynthesisError::Contradiction {
                cell: self.cell_position(cell),
                iteration: None,
            }),
            1 => {
                self.undecided -= 1;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Shannon entropy of a cell's remaining superposition
    ///
    /// `ln(Σw) − Σ(w·ln w)/Σw` over the possible patterns; exactly 0 for a
    /// decided cell. Callers never ask for the entropy of an empty cell.
    pub fn entropy(&self, cell: usize) -> f64 {
        if self.remaining.get(cell).copied().unwrap_or(0) <= 1 {
            return 0.0;
        }
        let sum = self.sum_weights.get(cell).copied().unwrap_or(0.0);
        let sum_log = self.sum_weight_log_weights.get(cell).copied().unwrap_or(0.0);
        sum.ln() - sum_log / sum
    }

    /// Sum of the entropies of all cells
    pub fn total_entropy(&self) -> f64 {
        (0..self.total_cells()).map(|cell| self.entropy(cell)).sum()
    }

    /// Decrement one support counter, returning the new value
    ///
    /// Counts how many patterns in the neighbor at the given offset still
    /// agree with `pattern`; the propagator bans the pattern when this
    /// reaches zero.
    pub(crate) fn decrement_support(&mut self, cell: usize, pattern: usize, offset: usize) -> u16 {
        let index = (cell * self.pattern_count + pattern) * self.offset_count + offset;
        match self.support.get_mut(index) {
            Some(slot) if *slot > 0 => {
                *slot -= 1;
                *slot
            }
            _ => 0,
        }
    }

    /// Take the oldest pending elimination off the worklist
    pub(crate) fn pop_elimination(&mut self) -> Option<(usize, usize)> {
        self.worklist.pop_front()
    }

    /// Number of eliminations awaiting propagation
    pub fn pending_eliminations(&self) -> usize {
        self.worklist.len()
    }

    /// Grid height in cells
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Grid width in cells
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of patterns tracked per cell
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Whether neighbor lookup wraps around the grid edges
    pub const fn periodic(&self) -> bool {
        self.periodic
    }

    /// Total number of cells
    pub const fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of cells collapsed to a single pattern
    pub fn decided_cells(&self) -> usize {
        self.total_cells() - self.undecided
    }

    /// Whether every cell is decided
    pub fn is_fully_decided(&self) -> bool {
        self.undecided == 0
    }

    /// Number of patterns still possible at a cell
    pub fn remaining(&self, cell: usize) -> usize {
        self.remaining.get(cell).copied().unwrap_or(0)
    }

    /// Whether a pattern is still possible at a cell
    pub fn contains(&self, cell: usize, pattern: usize) -> bool {
        self.possibilities
            .get(cell)
            .is_some_and(|set| set.contains(pattern))
    }

    /// All patterns still possible at a cell, ascending
    pub fn possible_patterns(&self, cell: usize) -> Vec<usize> {
        self.possibilities.get(cell).map_or_else(Vec::new, PatternBitset::to_vec)
    }

    /// The single surviving pattern of a decided cell
    pub fn sole_pattern(&self, cell: usize) -> Option<usize> {
        if self.remaining(cell) != 1 {
            return None;
        }
        self.possibilities.get(cell).and_then(|set| set.iter().next())
    }

    /// Current support counter for a (cell, pattern, offset) triple
    pub fn support_count(&self, cell: usize, pattern: usize, offset: usize) -> u16 {
        self.support
            .get((cell * self.pattern_count + pattern) * self.offset_count + offset)
            .copied()
            .unwrap_or(0)
    }

    /// Sum of weights over a cell's possible patterns
    pub fn sum_weight(&self, cell: usize) -> f64 {
        self.sum_weights.get(cell).copied().unwrap_or(0.0)
    }

    /// One pattern's weight as a float
    pub fn pattern_weight(&self, pattern: usize) -> f64 {
        self.weights.get(pattern).copied().unwrap_or(0.0)
    }

    /// Flat index of a (row, col) position
    pub const fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// (row, col) position of a flat cell index
    pub const fn cell_position(&self, cell: usize) -> [usize; 2] {
        [cell / self.cols, cell % self.cols]
    }
}
