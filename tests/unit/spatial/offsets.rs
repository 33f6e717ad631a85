//! Tests for the overlap offset table and neighbor arithmetic

#[cfg(test)]
mod tests {
    use wavecollapse::spatial::OffsetTable;

    // Tests the offset count formula (2N−1)² − 1 for several sizes
    // Verified by including the zero displacement in the enumeration
    #[test]
    fn test_offset_counts() {
        assert_eq!(OffsetTable::new(1).len(), 0);
        assert_eq!(OffsetTable::new(2).len(), 8);
        assert_eq!(OffsetTable::new(3).len(), 24);
        assert!(OffsetTable::new(1).is_empty());
    }

    // Tests that the zero displacement is excluded and bounds are honored
    // Verified by widening the displacement range by one
    #[test]
    fn test_displacement_bounds() {
        let table = OffsetTable::new(3);
        for [dr, dc] in table.iter() {
            assert!((dr != 0 || dc != 0), "zero displacement enumerated");
            assert!(dr.abs() < 3 && dc.abs() < 3, "displacement out of range");
        }
    }

    // Tests that opposite is an involution mapping d to −d
    // Verified by mapping every offset to itself
    #[test]
    fn test_opposite_is_an_involution() {
        let table = OffsetTable::new(3);
        for d in 0..table.len() {
            let [dr, dc] = table.displacement(d);
            let opposite = table.opposite(d);
            assert_eq!(table.displacement(opposite), [-dr, -dc]);
            assert_eq!(table.opposite(opposite), d);
        }
    }

    // Tests neighbor lookup with wrapping on a small grid
    // Verified by clamping instead of wrapping coordinates
    #[test]
    fn test_periodic_neighbor_wraps() {
        let table = OffsetTable::new(2);
        let up_left = table
            .iter()
            .position(|[dr, dc]| dr == -1 && dc == -1)
            .expect("offset exists");

        // Cell (0, 0) on a 4x5 torus wraps to (3, 4)
        assert_eq!(table.neighbor(0, up_left, 4, 5, true), Some(3 * 5 + 4));
    }

    // Tests that bounded lookup rejects displacements leaving the grid
    // Verified by wrapping regardless of the periodic flag
    #[test]
    fn test_bounded_neighbor_skips_out_of_range() {
        let table = OffsetTable::new(2);
        let up_left = table
            .iter()
            .position(|[dr, dc]| dr == -1 && dc == -1)
            .expect("offset exists");
        let down_right = table
            .iter()
            .position(|[dr, dc]| dr == 1 && dc == 1)
            .expect("offset exists");

        assert_eq!(table.neighbor(0, up_left, 4, 5, false), None);
        assert_eq!(table.neighbor(0, down_right, 4, 5, false), Some(6));
    }
}
