//! Tests for output image export

#[cfg(test)]
mod tests {
    use ndarray::array;
    use wavecollapse::io::image::export_indexed_image;
    use wavecollapse::SynthesisError;

    const PALETTE: [[u8; 4]; 2] = [[10, 20, 30, 255], [200, 100, 50, 255]];

    // Tests that an exported grid decodes back to the palette colors
    // Verified by swapping row and column when writing pixels
    #[test]
    fn test_export_round_trip() {
        let cells = array![[0, 1, 0], [1, 0, 1]];
        let path = std::env::temp_dir().join("wavecollapse_export_round_trip.png");

        export_indexed_image(&cells, &PALETTE, &path).expect("export succeeds");

        let decoded = image::open(&path).expect("decode succeeds").to_rgba8();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.get_pixel(0, 0).0, PALETTE[0]);
        assert_eq!(decoded.get_pixel(1, 0).0, PALETTE[1]);
        assert_eq!(decoded.get_pixel(2, 1).0, PALETTE[1]);

        let _ = std::fs::remove_file(&path);
    }

    // Tests that a cell referencing a missing palette entry is rejected
    // Verified by clamping indices into the palette instead of erroring
    #[test]
    fn test_out_of_palette_cell_is_rejected() {
        let cells = array![[0, 7]];
        let path = std::env::temp_dir().join("wavecollapse_export_bad_index.png");

        let result = export_indexed_image(&cells, &PALETTE, &path);
        assert!(matches!(
            result,
            Err(SynthesisError::InvalidSourceData { .. })
        ));
        assert!(!path.exists());
    }
}
