//! Sliding-window feature hashing for text inputs.
//!
//! Each `window`-byte window of the UTF-8 text is hashed with a seeded
//! 64-bit hash; the resulting bag of feature hashes is what [`fold`]
//! collapses into a fingerprint. The fingerprint pipeline does not care
//! which 64-bit hash produced the features, only that it is deterministic
//! for a given seed.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::fold::fold;

/// Default window width in code units.
pub const DEFAULT_WINDOW: usize = 5;

/// Settings for the window feature hasher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Window width in code units (bytes of the UTF-8 text).
    pub window: usize,
    /// Seed for the per-window hash.
    pub seed: u64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            seed: 0,
        }
    }
}

impl FeatureConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.window == 0 {
            return Err(FeatureError::InvalidWindow);
        }
        Ok(())
    }
}

/// Errors from the window feature hasher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeatureError {
    #[error("window must be >= 1")]
    InvalidWindow,
}

/// Hash every `window`-byte window of `text`.
///
/// Texts shorter than the window produce no features at all; the final full
/// window is always included.
pub fn window_features(text: &str, cfg: &FeatureConfig) -> Result<Vec<u64>, FeatureError> {
    cfg.validate()?;
    Ok(text
        .as_bytes()
        .windows(cfg.window)
        .map(|window| xxh3_64_with_seed(window, cfg.seed))
        .collect())
}

/// Fingerprint a text by hashing its windows and folding the results.
pub fn fingerprint_text(text: &str, cfg: &FeatureConfig) -> Result<u64, FeatureError> {
    Ok(fold(window_features(text, cfg)?))
}
