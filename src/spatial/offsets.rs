//! Overlap offset table and neighbor arithmetic
//!
//! Two N×N patterns constrain each other at every displacement (dr, dc) with
//! |dr|, |dc| < N except (0, 0). The table fixes one deterministic order for
//! those displacements so that the compatibility oracle, the wave's support
//! counters, and the propagator all agree on offset indices.

/// Enumerated overlap displacements for a fixed pattern size
///
/// Offsets are listed in row-major order over the (2N−1)×(2N−1) window with
/// the zero displacement removed, which makes the list centrally symmetric:
/// the opposite of an offset always exists and is precomputed.
#[derive(Clone, Debug)]
pub struct OffsetTable {
    tile_size: usize,
    offsets: Vec<[i32; 2]>,
    opposite: Vec<usize>,
}

impl OffsetTable {
    /// Build the offset table for a given pattern size
    pub fn new(tile_size: usize) -> Self {
        let reach = tile_size as i32 - 1;

        let mut offsets = Vec::new();
        for dr in -reach..=reach {
            for dc in -reach..=reach {
                if dr != 0 || dc != 0 {
                    offsets.push([dr, dc]);
                }
            }
        }

        let mut opposite = Vec::with_capacity(offsets.len());
        for &[dr, dc] in &offsets {
            let index = offsets
                .iter()
                .position(|&[or, oc]| or == -dr && oc == -dc)
                .unwrap_or(0);
            opposite.push(index);
        }

        Self {
            tile_size,
            offsets,
            opposite,
        }
    }

    /// Pattern size the table was built for
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of enumerated offsets, (2N−1)² − 1
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the table is empty (only for 1×1 patterns)
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Displacement vector (dr, dc) for an offset index
    pub fn displacement(&self, index: usize) -> [i32; 2] {
        self.offsets.get(index).copied().unwrap_or([0, 0])
    }

    /// Index of the offset pointing the opposite way
    pub fn opposite(&self, index: usize) -> usize {
        self.opposite.get(index).copied().unwrap_or(index)
    }

    /// All displacement vectors in table order
    pub fn iter(&self) -> impl Iterator<Item = [i32; 2]> + '_ {
        self.offsets.iter().copied()
    }

    /// Flat cell index displaced by an offset
    ///
    /// Coordinates wrap modulo the grid dimensions when `periodic` is set;
    /// otherwise displacements leaving the grid return `None`.
    pub fn neighbor(
        &self,
        cell: usize,
        index: usize,
        rows: usize,
        cols: usize,
        periodic: bool,
    ) -> Option<usize> {
        let [dr, dc] = self.displacement(index);
        let row = (cell / cols) as i32 + dr;
        let col = (cell % cols) as i32 + dc;

        if periodic {
            let row = row.rem_euclid(rows as i32) as usize;
            let col = col.rem_euclid(cols as i32) as usize;
            Some(row * cols + col)
        } else if row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols {
            Some(row as usize * cols + col as usize)
        } else {
            None
        }
    }
}
