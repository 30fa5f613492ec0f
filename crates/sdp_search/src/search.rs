//! Near-duplicate search across the permutation family.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sdp_simhash::hamming_distance;

use crate::error::SearchError;
use crate::family::PermutationFamily;
use crate::permutation::Permutation;
use crate::progress::progress_observer;

/// An unordered pair of fingerprints within the distance threshold, stored
/// canonically with `a <= b`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Match {
    pub a: u64,
    pub b: u64,
}

impl Match {
    /// Canonicalize an unordered pair.
    pub fn new(x: u64, y: u64) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Hamming distance between the two fingerprints.
    pub fn distance(&self) -> u32 {
        hamming_distance(self.a, self.b)
    }
}

/// All distinct canonical matches discovered across the permutations.
///
/// Keyed with the default SipHash hasher, which mixes both 64-bit halves
/// and does not degrade on adversarial fingerprint sets.
pub type MatchSet = HashSet<Match>;

/// Find every unordered pair of fingerprints within `distance` bits.
///
/// For each member of the permutation family the corpus is permuted into a
/// scratch buffer, sorted, and swept by maximal equal-prefix runs under the
/// member's search mask; every intra-run pair goes through the exact
/// distance test before its reverse-permuted canonical form is recorded.
/// Scans run in parallel with per-worker match sets merged after the join,
/// and the input set is never mutated.
pub fn find_matches(
    hashes: &HashSet<u64>,
    blocks: usize,
    distance: usize,
) -> Result<MatchSet, SearchError> {
    let family = PermutationFamily::new(blocks, distance)?;
    let corpus: Vec<u64> = hashes.iter().copied().collect();
    Ok(scan_family(&corpus, &family))
}

/// Scan every family member over an already-materialized corpus.
pub(crate) fn scan_family(corpus: &[u64], family: &PermutationFamily) -> MatchSet {
    let total = family.len();
    debug!(
        permutations = total,
        corpus = corpus.len(),
        blocks = family.blocks(),
        distance = family.distance(),
        "scanning permutation family"
    );

    family
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(index, permutation)| {
            let local = scan_permutation(corpus, permutation, family.distance());
            if let Some(observer) = progress_observer() {
                observer.permutation_scanned(index, total, local.len());
            }
            local
        })
        .reduce(MatchSet::new, |a, b| {
            let (mut merged, other) = if a.len() >= b.len() { (a, b) } else { (b, a) };
            merged.extend(other);
            merged
        })
}

/// Permute, sort, and sweep equal-prefix runs for one family member.
fn scan_permutation(corpus: &[u64], permutation: &Permutation, distance: usize) -> MatchSet {
    let mut permuted: Vec<u64> = corpus.iter().map(|&h| permutation.apply(h)).collect();
    permuted.sort_unstable();

    let mask = permutation.search_mask();
    let mut matches = MatchSet::new();
    let mut start = 0;
    while start < permuted.len() {
        let prefix = permuted[start] & mask;
        let mut end = start + 1;
        while end < permuted.len() && permuted[end] & mask == prefix {
            end += 1;
        }

        // The prefix only groups candidates; the distance test decides.
        let run = &permuted[start..end];
        for (offset, &a) in run.iter().enumerate() {
            for &b in &run[offset + 1..] {
                if hamming_distance(a, b) as usize <= distance {
                    matches.insert(Match::new(permutation.reverse(a), permutation.reverse(b)));
                }
            }
        }
        start = end;
    }
    matches
}
