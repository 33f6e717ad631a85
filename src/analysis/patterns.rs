//! Pattern extraction from palettized exemplars
//!
//! Slides an N×N window over the exemplar, optionally generating rotated and
//! reflected variants, and deduplicates the results while counting how often
//! each distinct pattern occurs. The resulting ordered, weighted pattern set
//! is the read-only input to the solver.

use crate::analysis::palette::Exemplar;
use ndarray::Array2;
use std::collections::HashMap;

/// Dihedral symmetry level controlling which pattern variants are emitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// Each window contributes only itself
    Identity,
    /// Identity plus the horizontal reflection
    Reflections,
    /// Identity plus the 90°, 180° and 270° rotations
    Rotations,
    /// The full dihedral group: four rotations, each also reflected
    Dihedral,
}

impl Symmetry {
    /// Parse the conventional 1/2/4/8 encoding
    ///
    /// # Errors
    ///
    /// Returns an error for any other value
    pub fn from_level(level: u8) -> crate::io::error::Result<Self> {
        match level {
            1 => Ok(Self::Identity),
            2 => Ok(Self::Reflections),
            4 => Ok(Self::Rotations),
            8 => Ok(Self::Dihedral),
            _ => Err(crate::io::error::invalid_parameter(
                "symmetry",
                &level,
                &"must be 1, 2, 4 or 8",
            )),
        }
    }

    /// Number of variants emitted per extracted window
    pub const fn variant_count(self) -> usize {
        match self {
            Self::Identity => 1,
            Self::Reflections => 2,
            Self::Rotations => 4,
            Self::Dihedral => 8,
        }
    }
}

/// One distinct N×N pattern and its observed frequency
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Palette indices, rows × cols
    pub pixels: Array2<usize>,
    /// Number of occurrences in the exemplar, counting symmetry variants
    pub weight: u32,
}

/// Ordered, deduplicated set of weighted patterns
///
/// Pattern indices are assigned in first-appearance order and are stable for
/// a given exemplar and configuration.
pub struct PatternSet {
    tile_size: usize,
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Extract all patterns from an exemplar
    ///
    /// Window origins cover the whole exemplar, wrapping around the edges,
    /// when `periodic_input` is set; otherwise only origins whose window lies
    /// fully inside the exemplar are used. Every emitted variant counts one
    /// occurrence toward its own deduplicated pattern's weight.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` is zero
    /// - The exemplar is smaller than the window and input is not periodic
    pub fn extract(
        exemplar: &Exemplar,
        tile_size: usize,
        symmetry: Symmetry,
        periodic_input: bool,
    ) -> crate::io::error::Result<Self> {
        if tile_size == 0 {
            return Err(crate::io::error::invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be at least 1",
            ));
        }
        if !periodic_input && (exemplar.rows() < tile_size || exemplar.cols() < tile_size) {
            return Err(crate::io::error::SynthesisError::InvalidSourceData {
                reason: format!(
                    "Exemplar {}x{} is smaller than the {tile_size}x{tile_size} window",
                    exemplar.rows(),
                    exemplar.cols()
                ),
            });
        }

        let (row_origins, col_origins) = if periodic_input {
            (exemplar.rows(), exemplar.cols())
        } else {
            (
                exemplar.rows() - tile_size + 1,
                exemplar.cols() - tile_size + 1,
            )
        };

        let mut indices: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut patterns = Vec::new();

        for row in 0..row_origins {
            for col in 0..col_origins {
                let window = extract_window(exemplar, row, col, tile_size);
                for variant in symmetry_variants(&window, symmetry) {
                    record_occurrence(&mut indices, &mut patterns, variant);
                }
            }
        }

        Ok(Self {
            tile_size,
            patterns,
        })
    }

    /// Build a pattern set from explicit patterns
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern's shape disagrees with `tile_size` or a
    /// weight is zero
    pub fn from_patterns(
        tile_size: usize,
        patterns: Vec<Pattern>,
    ) -> crate::io::error::Result<Self> {
        for (index, pattern) in patterns.iter().enumerate() {
            if pattern.pixels.dim() != (tile_size, tile_size) {
                return Err(crate::io::error::SynthesisError::InvalidSourceData {
                    reason: format!("Pattern {index} is not {tile_size}x{tile_size}"),
                });
            }
            if pattern.weight == 0 {
                return Err(crate::io::error::SynthesisError::InvalidSourceData {
                    reason: format!("Pattern {index} has zero weight"),
                });
            }
        }

        Ok(Self {
            tile_size,
            patterns,
        })
    }

    /// Window edge length N
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of distinct patterns T
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns were extracted
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All patterns in index order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// A single pattern's pixel grid
    pub fn pixels(&self, index: usize) -> Option<&Array2<usize>> {
        self.patterns.get(index).map(|p| &p.pixels)
    }

    /// A single pattern's weight
    pub fn weight(&self, index: usize) -> u32 {
        self.patterns.get(index).map_or(0, |p| p.weight)
    }
}

fn extract_window(exemplar: &Exemplar, row: usize, col: usize, tile_size: usize) -> Array2<usize> {
    let rows = exemplar.rows();
    let cols = exemplar.cols();
    Array2::from_shape_fn((tile_size, tile_size), |(r, c)| {
        exemplar
            .indices()
            .get([(row + r) % rows, (col + c) % cols])
            .copied()
            .unwrap_or(0)
    })
}

fn symmetry_variants(window: &Array2<usize>, symmetry: Symmetry) -> Vec<Array2<usize>> {
    match symmetry {
        Symmetry::Identity => vec![window.clone()],
        Symmetry::Reflections => vec![window.clone(), reflect(window)],
        Symmetry::Rotations => {
            let rot90 = rotate_90(window);
            let rot180 = rotate_90(&rot90);
            let rot270 = rotate_90(&rot180);
            vec![window.clone(), rot90, rot180, rot270]
        }
        Symmetry::Dihedral => {
            let rot90 = rotate_90(window);
            let rot180 = rotate_90(&rot90);
            let rot270 = rotate_90(&rot180);
            vec![
                window.clone(),
                reflect(window),
                reflect(&rot90),
                reflect(&rot180),
                reflect(&rot270),
                rot90,
                rot180,
                rot270,
            ]
        }
    }
}

fn record_occurrence(
    indices: &mut HashMap<Vec<usize>, usize>,
    patterns: &mut Vec<Pattern>,
    pixels: Array2<usize>,
) {
    let key: Vec<usize> = pixels.iter().copied().collect();
    if let Some(&index) = indices.get(&key) {
        if let Some(pattern) = patterns.get_mut(index) {
            pattern.weight += 1;
        }
    } else {
        indices.insert(key, patterns.len());
        patterns.push(Pattern { pixels, weight: 1 });
    }
}

fn rotate_90(window: &Array2<usize>) -> Array2<usize> {
    let n = window.dim().0;
    Array2::from_shape_fn((n, n), |(r, c)| {
        window.get([n - 1 - c, r]).copied().unwrap_or(0)
    })
}

fn reflect(window: &Array2<usize>) -> Array2<usize> {
    let n = window.dim().0;
    Array2::from_shape_fn((n, n), |(r, c)| {
        window.get([r, n - 1 - c]).copied().unwrap_or(0)
    })
}
