//! Tests for windowed pattern extraction, symmetry variants and weights

#[cfg(test)]
mod tests {
    use ndarray::{array, Array2};
    use wavecollapse::analysis::palette::Exemplar;
    use wavecollapse::analysis::patterns::{PatternSet, Symmetry};
    use wavecollapse::SynthesisError;

    const COLORS: [[u8; 4]; 4] = [
        [0, 0, 0, 255],
        [85, 85, 85, 255],
        [170, 170, 170, 255],
        [255, 255, 255, 255],
    ];

    fn exemplar_from(indices: Array2<usize>) -> Exemplar {
        Exemplar::from_parts(indices, COLORS.to_vec()).expect("exemplar is valid")
    }

    // Tests that a periodic checkerboard yields exactly the two alternating
    // tiles, each seen at half of the window origins
    // Verified by disabling deduplication so every origin makes a pattern
    #[test]
    fn test_checkerboard_extraction() {
        let exemplar = exemplar_from(Array2::from_shape_fn((4, 4), |(r, c)| (r + c) % 2));
        let patterns =
            PatternSet::extract(&exemplar, 2, Symmetry::Identity, true).expect("patterns extract");

        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns.weight(0), 8);
        assert_eq!(patterns.weight(1), 8);
        assert_eq!(
            patterns.pixels(0),
            Some(&array![[0, 1], [1, 0]]),
            "first-appearance order starts at the origin window"
        );
    }

    // Tests that non-periodic extraction only uses fully interior origins
    // Verified by letting the window run off the exemplar edge
    #[test]
    fn test_non_periodic_origin_count() {
        let exemplar = exemplar_from(Array2::from_shape_fn((3, 4), |(r, c)| (r * 4 + c) % 4));
        let patterns =
            PatternSet::extract(&exemplar, 2, Symmetry::Identity, false).expect("patterns extract");

        // 2x3 interior origins; identical rows fold them into 3 patterns
        assert_eq!(patterns.len(), 3);
        let total_weight: u32 = (0..patterns.len()).map(|i| patterns.weight(i)).sum();
        assert_eq!(total_weight, 6);
    }

    // Tests variant counts per symmetry level on a window with no
    // self-symmetry: every transform is distinct
    // Verified by emitting rotations for the reflection-only level
    #[test]
    fn test_symmetry_variant_counts() {
        let exemplar = exemplar_from(array![[0, 1], [2, 3]]);

        let identity = PatternSet::extract(&exemplar, 2, Symmetry::Identity, false)
            .expect("patterns extract");
        assert_eq!(identity.len(), 1);

        let reflections = PatternSet::extract(&exemplar, 2, Symmetry::Reflections, false)
            .expect("patterns extract");
        assert_eq!(reflections.len(), 2);

        let rotations = PatternSet::extract(&exemplar, 2, Symmetry::Rotations, false)
            .expect("patterns extract");
        assert_eq!(rotations.len(), 4);

        let dihedral = PatternSet::extract(&exemplar, 2, Symmetry::Dihedral, false)
            .expect("patterns extract");
        assert_eq!(dihedral.len(), 8);

        // Each variant occurrence carries exactly one unit of weight
        for index in 0..dihedral.len() {
            assert_eq!(dihedral.weight(index), 1);
        }
    }

    // Tests that variants landing on the same tile accumulate weight
    // instead of duplicating patterns
    // Verified by keying deduplication on the emitting transform
    #[test]
    fn test_self_symmetric_window_accumulates_weight() {
        let exemplar = exemplar_from(Array2::zeros((3, 3)));
        let patterns = PatternSet::extract(&exemplar, 2, Symmetry::Dihedral, true)
            .expect("patterns extract");

        // One uniform tile; 9 periodic origins × 8 variants each
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns.weight(0), 72);
    }

    // Tests the symmetry level parser accepts exactly 1, 2, 4 and 8
    // Verified by accepting arbitrary levels
    #[test]
    fn test_symmetry_levels() {
        assert_eq!(Symmetry::from_level(1).ok(), Some(Symmetry::Identity));
        assert_eq!(Symmetry::from_level(2).ok(), Some(Symmetry::Reflections));
        assert_eq!(Symmetry::from_level(4).ok(), Some(Symmetry::Rotations));
        assert_eq!(Symmetry::from_level(8).ok(), Some(Symmetry::Dihedral));
        assert!(Symmetry::from_level(3).is_err());
        assert_eq!(Symmetry::Rotations.variant_count(), 4);
    }

    // Tests that an exemplar smaller than the window is rejected unless
    // extraction wraps
    // Verified by clamping the window instead of erroring
    #[test]
    fn test_window_larger_than_exemplar() {
        let exemplar = exemplar_from(array![[0, 1], [1, 0]]);

        let result = PatternSet::extract(&exemplar, 3, Symmetry::Identity, false);
        assert!(matches!(
            result,
            Err(SynthesisError::InvalidSourceData { .. })
        ));

        let wrapped = PatternSet::extract(&exemplar, 3, Symmetry::Identity, true);
        assert!(wrapped.is_ok());
    }

    // Tests that a zero tile size is rejected up front
    // Verified by removing the parameter guard
    #[test]
    fn test_zero_tile_size_is_rejected() {
        let exemplar = exemplar_from(array![[0, 1], [1, 0]]);
        let result = PatternSet::extract(&exemplar, 0, Symmetry::Identity, true);
        assert!(matches!(
            result,
            Err(SynthesisError::InvalidParameter { .. })
        ));
    }

    // Tests the explicit constructor's shape and weight validation
    // Verified by dropping the zero-weight rejection
    #[test]
    fn test_from_patterns_validation() {
        use wavecollapse::analysis::patterns::Pattern;

        let good = PatternSet::from_patterns(
            2,
            vec![Pattern {
                pixels: array![[0, 1], [1, 0]],
                weight: 3,
            }],
        );
        assert!(good.is_ok_and(|set| set.weight(0) == 3));

        let zero_weight = PatternSet::from_patterns(
            2,
            vec![Pattern {
                pixels: array![[0, 1], [1, 0]],
                weight: 0,
            }],
        );
        assert!(matches!(
            zero_weight,
            Err(SynthesisError::InvalidSourceData { .. })
        ));

        let wrong_shape = PatternSet::from_patterns(
            3,
            vec![Pattern {
                pixels: array![[0, 1], [1, 0]],
                weight: 1,
            }],
        );
        assert!(matches!(
            wrong_shape,
            Err(SynthesisError::InvalidSourceData { .. })
        ));
    }
}
