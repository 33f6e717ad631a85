//! Tests for lowest-entropy observation and weighted collapse

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use rand::{rngs::StdRng, SeedableRng};
    use wavecollapse::algorithm::observer::{observe, ObserveOutcome};
    use wavecollapse::algorithm::wave::Wave;
    use wavecollapse::analysis::compatibility::CompatibilityOracle;
    use wavecollapse::analysis::palette::Exemplar;
    use wavecollapse::analysis::patterns::{PatternSet, Symmetry};

    const COLORS: [[u8; 4]; 3] = [
        [255, 255, 255, 255],
        [0, 0, 0, 255],
        [255, 0, 0, 255],
    ];

    fn stripes_state() -> (PatternSet, CompatibilityOracle, Wave) {
        let indices = Array2::from_shape_fn((6, 6), |(r, c)| (r + c) % 3);
        let exemplar = Exemplar::from_parts(indices, COLORS.to_vec()).expect("exemplar is valid");
        let patterns =
            PatternSet::extract(&exemplar, 3, Symmetry::Identity, true).expect("patterns extract");
        let oracle = CompatibilityOracle::build(&patterns).expect("oracle builds");
        let wave = Wave::new(6, 6, &patterns, &oracle, true).expect("wave builds");
        (patterns, oracle, wave)
    }

    // Tests that the cell with strictly fewer possibilities is observed
    // first; the jitter is orders of magnitude below the entropy gap
    // Verified by inverting the comparison in the entropy scan
    #[test]
    fn test_lowest_entropy_cell_wins() {
        let (_, _, mut wave) = stripes_state();
        let narrowed = wave.cell_index(2, 4);
        wave.ban(narrowed, 0).expect("two patterns remain");

        let mut rng = StdRng::seed_from_u64(11);
        match observe(&mut wave, &mut rng) {
            ObserveOutcome::Decided { cell, pattern } => {
                assert_eq!(cell, narrowed);
                assert_ne!(pattern, 0, "a banned pattern was chosen");
            }
            other => unreachable!("expected a collapse, got {other:?}"),
        }
    }

    // Tests that observation collapses the chosen cell to exactly one
    // pattern and queues the discarded ones for propagation
    // Verified by skipping the ban loop after sampling
    #[test]
    fn test_observation_collapses_to_singleton() {
        let (patterns, _, mut wave) = stripes_state();
        let mut rng = StdRng::seed_from_u64(21);

        match observe(&mut wave, &mut rng) {
            ObserveOutcome::Decided { cell, pattern } => {
                assert_eq!(wave.remaining(cell), 1);
                assert_eq!(wave.sole_pattern(cell), Some(pattern));
                assert_eq!(wave.pending_eliminations(), patterns.len() - 1);
            }
            other => unreachable!("expected a collapse, got {other:?}"),
        }
    }

    // Tests that an empty cell found during the scan is reported before
    // anything is sampled or banned
    // Verified by sampling before the empty-cell check
    #[test]
    fn test_empty_cell_is_reported() {
        let (patterns, _, mut wave) = stripes_state();
        let drained = wave.cell_index(1, 1);
        for pattern in 0..patterns.len() {
            let _ = wave.ban(drained, pattern);
        }
        let pending = wave.pending_eliminations();

        let mut rng = StdRng::seed_from_u64(31);
        assert_eq!(
            observe(&mut wave, &mut rng),
            ObserveOutcome::Contradiction { cell: drained }
        );
        assert_eq!(wave.pending_eliminations(), pending);
    }

    // Tests that two observers with the same seed make the same choice
    // Verified by mixing a time-derived value into the sampling draw
    #[test]
    fn test_observation_is_deterministic() {
        let (_, _, mut wave_a) = stripes_state();
        let (_, _, mut wave_b) = stripes_state();

        let mut rng_a = StdRng::seed_from_u64(77);
        let mut rng_b = StdRng::seed_from_u64(77);

        assert_eq!(observe(&mut wave_a, &mut rng_a), observe(&mut wave_b, &mut rng_b));
    }

    // Tests that a wave of decided cells reports Done without touching the
    // worklist, even when patterns impose no constraints at all
    // Verified by treating decided cells as observable candidates
    #[test]
    fn test_single_pattern_wave_is_done() {
        let indices = Array2::zeros((3, 3));
        let exemplar = Exemplar::from_parts(indices, vec![[9, 9, 9, 255]])
            .expect("exemplar is valid");
        let patterns =
            PatternSet::extract(&exemplar, 1, Symmetry::Identity, true).expect("patterns extract");
        let oracle = CompatibilityOracle::build(&patterns).expect("oracle builds");
        assert!(oracle.offsets().is_empty());

        let mut wave = Wave::new(4, 4, &patterns, &oracle, false).expect("wave builds");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(observe(&mut wave, &mut rng), ObserveOutcome::Done);
        assert_eq!(wave.pending_eliminations(), 0);
    }
}
