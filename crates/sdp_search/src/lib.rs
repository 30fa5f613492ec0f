//! sdp_search: sub-linear near-duplicate search over 64-bit fingerprints.
//!
//! The search reduces Hamming-ball queries to sorted-prefix scans. The 64
//! bits of a fingerprint are split into `blocks` contiguous blocks; for
//! every way of choosing `blocks - distance` of them, a block permutation
//! moves the chosen blocks into the high prefix of the word. Two
//! fingerprints within `distance` bits of each other must agree on at least
//! `blocks - distance` whole blocks, so under at least one member of the
//! permutation family they share the entire search prefix and land in the
//! same run of the sorted permuted corpus. Candidate pairs inside a run are
//! confirmed with an exact popcount test; the prefix is only ever a
//! candidate filter.
//!
//! Permutation scans are independent and run on a rayon pool, each with its
//! own scratch buffer and local match set. The locals are merged after the
//! join, so the hot pair loop takes no locks. Matches are canonical
//! `(min, max)` pairs and the final result is a set, so merge order never
//! affects the outcome.
//!
//! Clustering consumes the match set and emits connected components in a
//! deterministic order regardless of how the matches were discovered.

mod blocks;
mod cluster;
mod error;
mod family;
mod permutation;
mod progress;
mod search;

pub use crate::blocks::block_masks;
pub use crate::cluster::{Cluster, cluster_matches, find_clusters};
pub use crate::error::SearchError;
pub use crate::family::PermutationFamily;
pub use crate::permutation::Permutation;
pub use crate::progress::{SearchProgress, set_search_progress};
pub use crate::search::{Match, MatchSet, find_matches};
