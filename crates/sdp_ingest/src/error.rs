//! Error types produced by the `sdp_ingest` crate.
//!
//! Parse failures carry the 1-based line number so a bad row in a large
//! feed can be located; they are all reader-side and never reach the
//! search core.

use thiserror::Error;

/// Errors that can occur while reading fingerprint inputs.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected id<TAB>hash")]
    MalformedRow { line: usize },
    #[error("line {line}: invalid hash {value:?}")]
    InvalidHash { line: usize, value: String },
    #[error("line {line}: invalid json: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: missing or ill-typed column {column:?}")]
    MissingColumn { line: usize, column: String },
    #[error("invalid input config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Feature(#[from] sdp_simhash::FeatureError),
}
