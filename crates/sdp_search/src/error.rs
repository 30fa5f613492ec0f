//! Error types produced by the `sdp_search` crate.
//!
//! All variants are invalid-parameter failures raised while building the
//! permutation family; the search and clustering passes themselves are
//! total over 64-bit words.

use thiserror::Error;

/// Invalid-parameter failures for the search entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("blocks must be between 1 and 64, got {blocks}")]
    BlocksOutOfRange { blocks: usize },
    #[error("distance must be greater than zero")]
    DistanceZero,
    #[error("blocks ({blocks}) must be greater than distance ({distance})")]
    DistanceTooLarge { blocks: usize, distance: usize },
}
