//! Output image export for decided waves

use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Export a palette-index grid as an image
///
/// The encoding format is chosen from the output path's extension by the
/// `image` crate (PNG, BMP, …).
///
/// # Errors
///
/// Returns an error if:
/// - A cell references an index outside the palette
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_indexed_image(
    cells: &Array2<usize>,
    palette: &[[u8; 4]],
    output_path: &Path,
) -> crate::io::error::Result<()> {
    use crate::io::error::SynthesisError;

    let (rows, cols) = cells.dim();
    let mut img = ImageBuffer::new(cols as u32, rows as u32);

    for row in 0..rows {
        for col in 0..cols {
            let index = cells.get([row, col]).copied().unwrap_or(0);
            let Some(&rgba) = palette.get(index) else {
                return Err(SynthesisError::InvalidSourceData {
                    reason: format!(
                        "Cell ({row}, {col}) references color {index} outside a palette of {}",
                        palette.len()
                    ),
                });
            };
            img.put_pixel(col as u32, row as u32, Rgba(rgba));
        }
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| SynthesisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
