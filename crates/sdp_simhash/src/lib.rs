//! sdp_simhash: 64-bit SimHash fingerprints.
//!
//! A fingerprint is a plain `u64` whose Hamming distance to another
//! fingerprint estimates how dissimilar the underlying feature bags are.
//! This crate provides the folding step that collapses a bag of per-feature
//! hashes into one fingerprint, the Hamming distance between fingerprints,
//! and the sliding-window feature hasher used by the text ingest path.
//!
//! Folding and distance are total over `u64` and allocation-free; only the
//! feature hasher is configuration-driven (window width and hash seed).

mod features;
mod fold;

pub use crate::features::{
    DEFAULT_WINDOW, FeatureConfig, FeatureError, fingerprint_text, window_features,
};
pub use crate::fold::{FINGERPRINT_BITS, fold, hamming_distance};
