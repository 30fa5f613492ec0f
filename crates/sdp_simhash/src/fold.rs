//! Fingerprint folding and Hamming distance.

/// Number of bits in a fingerprint.
pub const FINGERPRINT_BITS: usize = 64;

/// Count the bits at which two fingerprints differ.
#[inline]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Collapse a bag of 64-bit feature hashes into a single fingerprint.
///
/// Every feature votes +1 on each bit position it has set and -1 on each
/// position it has clear. Bit `i` of the result is set iff its tally is
/// strictly positive, so ties resolve to 0 and an empty bag folds to 0.
/// Tallies are `i64` and cannot wrap for fewer than 2^62 features.
pub fn fold<I>(features: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut tallies = [0i64; FINGERPRINT_BITS];
    for feature in features {
        for (i, tally) in tallies.iter_mut().enumerate() {
            *tally += if feature >> i & 1 == 1 { 1 } else { -1 };
        }
    }

    let mut fingerprint = 0u64;
    for (i, &tally) in tallies.iter().enumerate() {
        if tally > 0 {
            fingerprint |= 1 << i;
        }
    }
    fingerprint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamming_counts_differing_bits() {
        assert_eq!(hamming_distance(0, 0), 0);
        assert_eq!(hamming_distance(0, u64::MAX), 64);
        assert_eq!(hamming_distance(0b1010, 0b0110), 2);
        assert_eq!(hamming_distance(0x7, 0x0), 3);
    }

    #[test]
    fn fold_majority_wins() {
        // Bit 0 is set in two of three features, bit 1 in one of three.
        assert_eq!(fold([0x1, 0x1, 0x2]), 0x1);
    }

    #[test]
    fn fold_ties_resolve_to_zero() {
        assert_eq!(fold([0x1, 0x2]), 0x0);
        assert_eq!(fold([u64::MAX, 0]), 0x0);
    }

    #[test]
    fn fold_empty_is_zero() {
        assert_eq!(fold(std::iter::empty::<u64>()), 0);
    }

    #[test]
    fn fold_single_feature_is_identity() {
        let feature = 0xDEAD_BEEF_CAFE_F00D;
        assert_eq!(fold([feature]), feature);
    }

    #[test]
    fn fold_bit_rule_holds_per_position() {
        let features = [0xF0F0, 0xFF00, 0x0FF0, 0x00FF, 0xAAAA];
        let folded = fold(features);
        for bit in 0..FINGERPRINT_BITS {
            let set = features.iter().filter(|f| *f >> bit & 1 == 1).count();
            let expected = 2 * set > features.len();
            assert_eq!(
                folded >> bit & 1 == 1,
                expected,
                "bit {bit}: {set}/{} features set",
                features.len()
            );
        }
    }
}
