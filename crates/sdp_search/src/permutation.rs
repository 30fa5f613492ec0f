//! Block permutations over 64-bit fingerprints.

/// A bijection on 64-bit words obtained by reordering whole bit blocks.
///
/// Built from block masks in the order they are consumed; the first mask
/// lands in the most significant positions of the permuted word. Per-block
/// shift offsets and reverse masks are precomputed, so [`apply`] and
/// [`reverse`] are a handful of mask-and-shift operations each.
///
/// [`apply`]: Permutation::apply
/// [`reverse`]: Permutation::reverse
#[derive(Debug, Clone)]
pub struct Permutation {
    forward_masks: Vec<u64>,
    reverse_masks: Vec<u64>,
    offsets: Vec<i32>,
    search_mask: u64,
}

impl Permutation {
    /// Build a permutation from contiguous block masks, ordered as they
    /// will appear from the top of the permuted word down. `distance`
    /// fixes how many trailing blocks the search mask excludes; callers
    /// guarantee `distance` is below the block count.
    pub(crate) fn new(distance: usize, masks: Vec<u64>) -> Self {
        let mut reverse_masks = Vec::with_capacity(masks.len());
        let mut offsets = Vec::with_capacity(masks.len());
        let mut consumed = 0u32;
        let mut prefix_width = 0u32;

        for (index, &mask) in masks.iter().enumerate() {
            let right_edge = mask.trailing_zeros();
            // Blocks are contiguous runs, so popcount is the width.
            let width = mask.count_ones();
            consumed += width;

            // The block's destination right edge is 64 - consumed.
            let offset = 64 - consumed as i32 - right_edge as i32;
            offsets.push(offset);
            reverse_masks.push(shift(mask, offset));

            if index < masks.len() - distance {
                prefix_width += width;
            }
        }

        let search_mask = !0u64 << (64 - prefix_width);
        Self {
            forward_masks: masks,
            reverse_masks,
            offsets,
            search_mask,
        }
    }

    /// Apply the permutation.
    #[inline]
    pub fn apply(&self, hash: u64) -> u64 {
        let mut result = 0;
        for (&mask, &offset) in self.forward_masks.iter().zip(&self.offsets) {
            result |= shift(hash & mask, offset);
        }
        result
    }

    /// Undo [`apply`](Permutation::apply), recovering the original word.
    #[inline]
    pub fn reverse(&self, hash: u64) -> u64 {
        let mut result = 0;
        for (&mask, &offset) in self.reverse_masks.iter().zip(&self.offsets) {
            result |= shift(hash & mask, -offset);
        }
        result
    }

    /// Prefix mask covering the leading `blocks - distance` permuted blocks.
    ///
    /// Sharing this prefix is necessary but not sufficient for two words to
    /// be within `distance` bits of each other, so candidates grouped by it
    /// still go through the exact popcount test.
    #[inline]
    pub fn search_mask(&self) -> u64 {
        self.search_mask
    }
}

#[inline]
fn shift(value: u64, offset: i32) -> u64 {
    if offset >= 0 {
        value << offset
    } else {
        value >> -offset
    }
}

#[cfg(test)]
mod tests {
    use crate::family::PermutationFamily;

    fn splitmix64(mut x: u64) -> u64 {
        x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = x;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    #[test]
    fn roundtrip_over_every_family_member() {
        let probes: Vec<u64> = [0u64, 1, u64::MAX, 0xAAAA_AAAA_AAAA_AAAA]
            .into_iter()
            .chain((0..256).map(splitmix64))
            .collect();

        for (blocks, distance) in [(4, 1), (4, 3), (6, 3), (7, 2), (8, 5), (64, 63)] {
            let family = PermutationFamily::new(blocks, distance).unwrap();
            for permutation in family.as_slice() {
                for &h in &probes {
                    assert_eq!(permutation.reverse(permutation.apply(h)), h);
                    assert_eq!(permutation.apply(permutation.reverse(h)), h);
                }
            }
        }
    }

    #[test]
    fn apply_preserves_popcount() {
        let family = PermutationFamily::new(6, 3).unwrap();
        for permutation in family.as_slice() {
            for i in 0..256u64 {
                let h = splitmix64(i);
                assert_eq!(permutation.apply(h).count_ones(), h.count_ones());
            }
        }
    }

    #[test]
    fn search_mask_is_a_prefix_of_the_right_width() {
        for (blocks, distance) in [(4, 1), (4, 2), (6, 3), (7, 5), (16, 3)] {
            let family = PermutationFamily::new(blocks, distance).unwrap();
            for permutation in family.as_slice() {
                let mask = permutation.search_mask();
                let width = mask.count_ones();
                // High bits set, low bits clear, nothing in between.
                assert_eq!(mask, !0u64 << (64 - width));
                assert!(width >= 1 && width < 64, "blocks={blocks} distance={distance}");
            }
        }
    }

    #[test]
    fn identity_family_member_keeps_low_blocks_low() {
        // The first member of the family chooses the lowest blocks as the
        // prefix; for (4, 2) that means blocks 0 and 1 move to the top.
        let family = PermutationFamily::new(4, 2).unwrap();
        let first = &family.as_slice()[0];
        assert_eq!(first.apply(0x0000_0000_0000_FFFF), 0xFFFF_0000_0000_0000);
        assert_eq!(first.apply(0x0000_0000_FFFF_0000), 0x0000_FFFF_0000_0000);
    }
}
