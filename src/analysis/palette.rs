//! Exemplar image loading and palettization
//!
//! Converts an exemplar image into a grid of small integer color indices plus
//! the palette they refer to. All downstream work (pattern extraction,
//! compatibility, rendering) operates on indices only.

use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// A palettized exemplar: index grid plus RGBA palette
pub struct Exemplar {
    indices: Array2<usize>,
    palette: Vec<[u8; 4]>,
}

impl Exemplar {
    /// Load and palettize an exemplar image
    ///
    /// The image format (PNG, BMP, …) is detected by the `image` crate.
    /// Distinct colors are sorted bytewise before index assignment so that
    /// the palette, and therefore every pattern index derived from it, is
    /// reproducible across runs.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or decoded
    /// - The image has zero width or height
    pub fn from_image_file<P: AsRef<Path>>(path: P) -> crate::io::error::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| crate::io::error::SynthesisError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        if width == 0 || height == 0 {
            return Err(crate::io::error::SynthesisError::InvalidSourceData {
                reason: "Exemplar image has zero area".to_string(),
            });
        }

        let mut color_set = std::collections::HashSet::new();
        for pixel in rgba_img.pixels() {
            color_set.insert(pixel.0);
        }

        // Deterministic color ordering ensures reproducible pattern indices
        let mut palette: Vec<[u8; 4]> = color_set.into_iter().collect();
        palette.sort_unstable();

        let mut color_indices = HashMap::new();
        for (index, &color) in palette.iter().enumerate() {
            color_indices.insert(color, index);
        }

        let mut indices = Array2::zeros((height, width));
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            if let Some(&index) = color_indices.get(&pixel.0) {
                if let Some(cell) = indices.get_mut([y as usize, x as usize]) {
                    *cell = index;
                }
            }
        }

        Ok(Self { indices, palette })
    }

    /// Build an exemplar from an index grid and palette directly
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has zero area or references a color
    /// index outside the palette
    pub fn from_parts(
        indices: Array2<usize>,
        palette: Vec<[u8; 4]>,
    ) -> crate::io::error::Result<Self> {
        let (rows, cols) = indices.dim();
        if rows == 0 || cols == 0 {
            return Err(crate::io::error::SynthesisError::InvalidSourceData {
                reason: "Exemplar grid has zero area".to_string(),
            });
        }

        if let Some(&bad) = indices.iter().find(|&&index| index >= palette.len()) {
            return Err(crate::io::error::SynthesisError::InvalidSourceData {
                reason: format!(
                    "Color index {bad} is out of range for a palette of {} entries",
                    palette.len()
                ),
            });
        }

        Ok(Self { indices, palette })
    }

    /// Height of the exemplar in pixels
    pub fn rows(&self) -> usize {
        self.indices.dim().0
    }

    /// Width of the exemplar in pixels
    pub fn cols(&self) -> usize {
        self.indices.dim().1
    }

    /// The palettized index grid (rows × cols)
    pub const fn indices(&self) -> &Array2<usize> {
        &self.indices
    }

    /// RGBA palette entries, in index order
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }
}
