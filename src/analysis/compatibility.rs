//! Pairwise pattern-overlap compatibility oracle
//!
//! For every ordered pattern pair and every overlap displacement, records
//! whether the two patterns agree on the pixels their windows share. The
//! oracle is built once after extraction and is read-only thereafter; the
//! solver's support counters are seeded from its per-offset totals and its
//! adjacency lists drive the propagation hot loop.

use crate::analysis::patterns::PatternSet;
use crate::io::configuration::MAX_PATTERN_COUNT;
use crate::spatial::OffsetTable;
use bitvec::prelude::*;
use ndarray::Array2;

/// Immutable compatibility tensor over pattern pairs and overlap offsets
///
/// Bit `(i·T + j)·D + d` is set when pattern `j` may sit at displacement `d`
/// from pattern `i`. The layout is flat and row-major so that the per-pair
/// bits for all offsets share a cache line.
pub struct CompatibilityOracle {
    pattern_count: usize,
    offsets: OffsetTable,
    bits: BitVec,
    support_totals: Vec<u16>,
    compatible: Vec<Vec<u16>>,
}

impl CompatibilityOracle {
    /// Build the oracle for a pattern set
    ///
    /// # Errors
    ///
    /// Returns `TooManyPatterns` when the set exceeds the pattern-index
    /// limit the support counters are sized for
    pub fn build(patterns: &PatternSet) -> crate::io::error::Result<Self> {
        let pattern_count = patterns.len();
        if pattern_count > MAX_PATTERN_COUNT {
            return Err(crate::io::error::SynthesisError::TooManyPatterns {
                count: pattern_count,
                limit: MAX_PATTERN_COUNT,
            });
        }

        let offsets = OffsetTable::new(patterns.tile_size());
        let offset_count = offsets.len();

        let mut bits = bitvec![0; pattern_count * pattern_count * offset_count];
        let mut support_totals = vec![0u16; pattern_count * offset_count];
        let mut compatible = vec![Vec::new(); pattern_count * offset_count];

        for i in 0..pattern_count {
            for j in 0..pattern_count {
                let (Some(pixels_i), Some(pixels_j)) = (patterns.pixels(i), patterns.pixels(j))
                else {
                    continue;
                };
                for (d, [dr, dc]) in offsets.iter().enumerate() {
                    if overlap_agrees(pixels_i, pixels_j, dr, dc) {
                        bits.set((i * pattern_count + j) * offset_count + d, true);
                        if let Some(total) = support_totals.get_mut(i * offset_count + d) {
                            *total += 1;
                        }
                        if let Some(list) = compatible.get_mut(i * offset_count + d) {
                            list.push(j as u16);
                        }
                    }
                }
            }
        }

        Ok(Self {
            pattern_count,
            offsets,
            bits,
            support_totals,
            compatible,
        })
    }

    /// Number of patterns the oracle covers
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// The shared offset table
    pub const fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Whether pattern `j` may sit at offset `d` from pattern `i`
    pub fn supports(&self, i: usize, j: usize, d: usize) -> bool {
        let index = (i * self.pattern_count + j) * self.offsets.len() + d;
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Number of patterns compatible with `i` at offset `d`
    ///
    /// This is the seed value for a fresh wave's support counters.
    pub fn support_total(&self, i: usize, d: usize) -> u16 {
        self.support_totals
            .get(i * self.offsets.len() + d)
            .copied()
            .unwrap_or(0)
    }

    /// Indices of all patterns compatible with `i` at offset `d`
    pub fn compatible(&self, i: usize, d: usize) -> &[u16] {
        self.compatible
            .get(i * self.offsets.len() + d)
            .map_or(&[], Vec::as_slice)
    }
}

/// Whether two windows agree on their shared pixels at a displacement
///
/// The overlap region runs over every (r, c) of pattern `j` whose displaced
/// counterpart (r + dr, c + dc) still lies inside pattern `i`.
fn overlap_agrees(pixels_i: &Array2<usize>, pixels_j: &Array2<usize>, dr: i32, dc: i32) -> bool {
    let n = pixels_i.dim().0 as i32;

    let row_range = (-dr).max(0)..(n - dr).min(n);
    let col_range = (-dc).max(0)..(n - dc).min(n);

    for r in row_range {
        for c in col_range.clone() {
            let from_i = pixels_i.get([(r + dr) as usize, (c + dc) as usize]);
            let from_j = pixels_j.get([r as usize, c as usize]);
            if from_i != from_j {
                return false;
            }
        }
    }
    true
}
