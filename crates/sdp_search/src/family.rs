//! Enumeration of the permutation family for a (blocks, distance) pair.

use crate::blocks::block_masks;
use crate::error::SearchError;
use crate::permutation::Permutation;

/// The `C(blocks, distance)` permutations that place every possible choice
/// of `blocks - distance` blocks in the high prefix.
///
/// Any two fingerprints within `distance` bits of each other differ in at
/// most `distance` blocks, so they agree on some `blocks - distance` of
/// them; the member that moves exactly those blocks into the prefix makes
/// the pair collide on its search mask.
#[derive(Debug, Clone)]
pub struct PermutationFamily {
    permutations: Vec<Permutation>,
    blocks: usize,
    distance: usize,
}

impl PermutationFamily {
    /// Build the family, validating `0 < distance < blocks <= 64`.
    pub fn new(blocks: usize, distance: usize) -> Result<Self, SearchError> {
        if distance == 0 {
            return Err(SearchError::DistanceZero);
        }
        let masks = block_masks(blocks)?;
        if blocks <= distance {
            return Err(SearchError::DistanceTooLarge { blocks, distance });
        }

        let keep = blocks - distance;
        let mut permutations = Vec::new();
        for chosen in Combinations::new(blocks, keep) {
            // Chosen blocks first, the rest after, both groups keeping
            // their original relative order.
            let mut ordered: Vec<u64> = chosen.iter().map(|&i| masks[i]).collect();
            ordered.extend((0..blocks).filter(|i| !chosen.contains(i)).map(|i| masks[i]));
            permutations.push(Permutation::new(distance, ordered));
        }

        Ok(Self {
            permutations,
            blocks,
            distance,
        })
    }

    /// Number of blocks the family partitions the word into.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Maximum Hamming distance the family is built for.
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Number of permutations in the family.
    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    /// The permutations, in stable enumeration order.
    pub fn as_slice(&self) -> &[Permutation] {
        &self.permutations
    }
}

/// Lexicographic enumeration of the size-`r` index subsets of `0..n`, the
/// textbook next-combination algorithm.
struct Combinations {
    indices: Vec<usize>,
    n: usize,
    r: usize,
    started: bool,
}

impl Combinations {
    fn new(n: usize, r: usize) -> Self {
        Self {
            indices: (0..r).collect(),
            n,
            r,
            started: false,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Find the rightmost index that can still move right.
        let mut i = self.r;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.r {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..self.r {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}
