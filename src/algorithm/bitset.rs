use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which patterns remain possible at a cell
///
/// Pattern indices are dense and zero-based. Provides O(1) membership
/// testing and set-bit iteration for weighted sampling.
#[derive(Clone, Debug)]
pub struct PatternBitset {
    bits: BitVec,
    pattern_count: usize,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
            pattern_count,
        }
    }

    /// Create a bitset containing every pattern
    pub fn full(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
            pattern_count,
        }
    }

    /// Insert a pattern index
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.pattern_count {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern index
    pub fn remove(&mut self, pattern: usize) {
        if pattern < self.pattern_count {
            self.bits.set(pattern, false);
        }
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over the present pattern indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all present pattern indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PatternBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatternBitset({} patterns: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
