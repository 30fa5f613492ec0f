//! Workspace umbrella crate for simdup.
//!
//! simdup finds near-duplicate documents in large collections by operating
//! on 64-bit SimHash fingerprints: every unordered pair of fingerprints
//! within a Hamming-distance threshold is enumerated with a family of
//! bit-block permutations, then grouped into connected components.
//!
//! The `simdup` crate re-exports the fingerprint, search, and ingest
//! layers so applications can drive the full pipeline through a single
//! dependency, and provides [`run_pipeline`] as the "read, cluster, write"
//! entry point the CLI builds on.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::io;
//!
//! use simdup::{run_pipeline, InputConfig, InputFormat};
//!
//! # fn demo() -> Result<(), simdup::PipelineError> {
//! let input_cfg = InputConfig {
//!     format: InputFormat::Hash,
//!     ..Default::default()
//! };
//!
//! let stdin = io::stdin();
//! let stdout = io::stdout();
//! let summary = run_pipeline(stdin.lock(), stdout.lock(), &input_cfg, 6, 3)?;
//! eprintln!("{} hashes in {} clusters", summary.hashes, summary.clusters);
//! # Ok(())
//! # }
//! ```
//!
//! Library users that keep their own identifier bookkeeping can call the
//! core directly: [`fold`] to build fingerprints, [`find_matches`] for the
//! raw pair set, [`find_clusters`] for connected components.
//!
//! ## Observability
//!
//! Per-permutation progress can be captured by installing a
//! [`SearchProgress`] observer via [`set_search_progress`]; the reader and
//! pipeline log through `tracing`.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::info;

pub mod config;
mod output;

pub use crate::config::{
    ConfigLoadError, InputYamlConfig, OutputYamlConfig, SearchYamlConfig, SimdupConfig,
};
pub use crate::output::write_clusters;
pub use sdp_ingest::{HashCorpus, IngestError, InputConfig, InputFormat, read_corpus};
pub use sdp_search::{
    Cluster, Match, MatchSet, Permutation, PermutationFamily, SearchError, SearchProgress,
    block_masks, cluster_matches, find_clusters, find_matches, set_search_progress,
};
pub use sdp_simhash::{
    DEFAULT_WINDOW, FeatureConfig, FeatureError, fingerprint_text, fold, hamming_distance,
    window_features,
};

/// Errors from the end-to-end pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading or parsing the input failed.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    /// Search parameters were invalid.
    #[error("search error: {0}")]
    Search(#[from] SearchError),
    /// Writing the cluster report failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// What a pipeline run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Distinct fingerprints read from the input.
    pub hashes: usize,
    /// Clusters written to the output.
    pub clusters: usize,
}

/// Read a corpus, cluster it, and write the TSV report.
pub fn run_pipeline(
    input: impl BufRead,
    output: impl Write,
    input_cfg: &InputConfig,
    blocks: usize,
    distance: usize,
) -> Result<PipelineSummary, PipelineError> {
    let corpus = read_corpus(input, input_cfg)?;
    let clusters = find_clusters(corpus.hashes(), blocks, distance)?;
    info!(
        hashes = corpus.len(),
        clusters = clusters.len(),
        "clustering complete"
    );
    write_clusters(output, &clusters, &corpus)?;
    Ok(PipelineSummary {
        hashes: corpus.len(),
        clusters: clusters.len(),
    })
}
