//! Tests for `PatternBitset` operations

#[cfg(test)]
mod tests {
    use wavecollapse::algorithm::bitset::PatternBitset;

    // Verifies a new PatternBitset is empty with count 0
    // Verified by initializing the bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = PatternBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
    }

    // Verifies a full PatternBitset contains every pattern index
    // Verified by initializing all bits to 0 instead of 1
    #[test]
    fn test_full_bitset() {
        let bitset = PatternBitset::full(5);
        for pattern in 0..5 {
            assert!(bitset.contains(pattern));
        }
        assert_eq!(bitset.count(), 5);
    }

    // Tests insertion, removal and containment checking
    // Verified by removing the bit-clearing logic from the remove method
    #[test]
    fn test_insert_remove_contains() {
        let mut bitset = PatternBitset::new(10);
        bitset.insert(4);
        assert!(bitset.contains(4));
        assert!(!bitset.contains(3));
        assert_eq!(bitset.count(), 1);

        bitset.remove(4);
        assert!(!bitset.contains(4));
        assert!(bitset.is_empty());
    }

    // Tests that out-of-range indices are ignored rather than panicking
    // Verified by removing the bounds guard from insert
    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let mut bitset = PatternBitset::new(3);
        bitset.insert(7);
        assert!(!bitset.contains(7));
        assert!(bitset.is_empty());
    }

    // Tests set-bit iteration order and vector conversion
    // Verified by reversing the iteration direction
    #[test]
    fn test_iteration_is_ascending() {
        let mut bitset = PatternBitset::new(10);
        bitset.insert(7);
        bitset.insert(0);
        bitset.insert(3);

        assert_eq!(bitset.to_vec(), vec![0, 3, 7]);
        assert_eq!(bitset.iter().next(), Some(0));
    }
}
