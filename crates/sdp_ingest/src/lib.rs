//! sdp_ingest: input readers for the simdup pipeline.
//!
//! The readers materialize the fingerprint set the search core consumes,
//! together with the side table from fingerprint to external identifiers
//! that the output writer needs. Two formats are supported:
//!
//! - `hash`: tab-separated `id`/`hash` rows with a header line, hashes as
//!   decimal unsigned 64-bit values;
//! - `json`: one JSON object per line whose text column is window-hashed
//!   and folded into a fingerprint.
//!
//! The core never sees identifiers; it consumes only the fingerprint set.
//! Reading is fail-fast: a malformed row aborts the load with its line
//! number rather than silently contributing a bogus fingerprint.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::BufRead;
use std::time::Instant;

use tracing::{info, warn};

use sdp_simhash::fingerprint_text;

mod config;
mod error;

pub use crate::config::{InputConfig, InputFormat};
pub use crate::error::IngestError;

/// A fingerprint set plus the identifiers that produced each fingerprint.
///
/// Distinct documents can share a fingerprint (identical or near-identical
/// content), so each fingerprint maps to a set of identifiers.
#[derive(Debug, Default, Clone)]
pub struct HashCorpus {
    hashes: HashSet<u64>,
    ids: HashMap<u64, BTreeSet<String>>,
}

impl HashCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fingerprint under an external identifier.
    pub fn insert(&mut self, hash: u64, id: String) {
        self.hashes.insert(hash);
        self.ids.entry(hash).or_default().insert(id);
    }

    /// The distinct fingerprints.
    pub fn hashes(&self) -> &HashSet<u64> {
        &self.hashes
    }

    /// Identifiers recorded for a fingerprint, in sorted order.
    pub fn ids_for(&self, hash: u64) -> impl Iterator<Item = &str> {
        self.ids.get(&hash).into_iter().flatten().map(String::as_str)
    }

    /// Number of distinct fingerprints.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Read fingerprints from `input` according to `cfg`.
///
/// `sample > 0` caps the number of records consumed. Returns the corpus
/// and logs how many records and distinct fingerprints were loaded.
pub fn read_corpus(input: impl BufRead, cfg: &InputConfig) -> Result<HashCorpus, IngestError> {
    cfg.validate()?;
    let start = Instant::now();
    let mut corpus = HashCorpus::new();
    let mut records = 0usize;

    match cfg.format {
        InputFormat::Hash => read_hash_rows(input, cfg, &mut corpus, &mut records)?,
        InputFormat::Json => read_json_lines(input, cfg, &mut corpus, &mut records)?,
    }

    let elapsed_micros = start.elapsed().as_micros();
    info!(
        records,
        hashes = corpus.len(),
        elapsed_micros,
        "corpus loaded"
    );
    Ok(corpus)
}

fn read_hash_rows(
    input: impl BufRead,
    cfg: &InputConfig,
    corpus: &mut HashCorpus,
    records: &mut usize,
) -> Result<(), IngestError> {
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if index == 0 {
            // Header row.
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let number = index + 1;

        let Some((id, rest)) = line.split_once('\t') else {
            return Err(IngestError::MalformedRow { line: number });
        };
        // Only the first two columns matter; tolerate trailing ones.
        let value = match rest.split_once('\t') {
            Some((value, _)) => value,
            None => rest,
        };
        let value = value.trim_end_matches('\r');

        let hash: u64 = value.parse().map_err(|_| IngestError::InvalidHash {
            line: number,
            value: value.to_string(),
        })?;

        corpus.insert(hash, id.to_string());
        *records += 1;
        if cfg.sample > 0 && *records >= cfg.sample {
            break;
        }
    }
    Ok(())
}

fn read_json_lines(
    input: impl BufRead,
    cfg: &InputConfig,
    corpus: &mut HashCorpus,
    records: &mut usize,
) -> Result<(), IngestError> {
    let text_column = cfg
        .text_column
        .as_deref()
        .ok_or_else(|| IngestError::InvalidConfig("text_column is required for json input".into()))?;
    let id_column = cfg
        .id_column
        .as_deref()
        .ok_or_else(|| IngestError::InvalidConfig("id_column is required for json input".into()))?;
    let features = cfg.feature_config();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let number = index + 1;

        let record: serde_json::Value =
            serde_json::from_str(&line).map_err(|source| IngestError::Json {
                line: number,
                source,
            })?;

        let Some(text) = record.get(text_column).and_then(serde_json::Value::as_str) else {
            return Err(IngestError::MissingColumn {
                line: number,
                column: text_column.to_string(),
            });
        };
        let id = match record.get(id_column) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(value) if value.is_number() => value.to_string(),
            _ => {
                return Err(IngestError::MissingColumn {
                    line: number,
                    column: id_column.to_string(),
                });
            }
        };

        if text.len() < features.window {
            warn!(line = number, id = %id, "text shorter than window, fingerprint is 0");
        }
        let hash = fingerprint_text(text, &features)?;

        corpus.insert(hash, id);
        *records += 1;
        if cfg.sample > 0 && *records >= cfg.sample {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_cfg() -> InputConfig {
        InputConfig::default()
    }

    fn json_cfg() -> InputConfig {
        InputConfig {
            format: InputFormat::Json,
            text_column: Some("text".into()),
            id_column: Some("id".into()),
            ..Default::default()
        }
    }

    #[test]
    fn reads_hash_rows_and_skips_header() {
        let input = "id\thash\ndoc-a\t12\ndoc-b\t13\ndoc-c\t12\n";
        let corpus = read_corpus(input.as_bytes(), &hash_cfg()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert!(corpus.hashes().contains(&12));
        assert!(corpus.hashes().contains(&13));
        let ids: Vec<&str> = corpus.ids_for(12).collect();
        assert_eq!(ids, vec!["doc-a", "doc-c"]);
    }

    #[test]
    fn hash_rows_tolerate_trailing_columns_and_crlf() {
        let input = "id\thash\textra\r\ndoc-a\t42\tignored\r\ndoc-b\t7\r\n";
        let corpus = read_corpus(input.as_bytes(), &hash_cfg()).unwrap();
        assert!(corpus.hashes().contains(&42));
        assert!(corpus.hashes().contains(&7));
    }

    #[test]
    fn sample_caps_the_record_count() {
        let input = "id\thash\na\t1\nb\t2\nc\t3\nd\t4\n";
        let cfg = InputConfig {
            sample: 2,
            ..Default::default()
        };
        let corpus = read_corpus(input.as_bytes(), &cfg).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.hashes().contains(&1));
        assert!(corpus.hashes().contains(&2));
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let input = "id\thash\ndoc-a no tab here\n";
        let err = read_corpus(input.as_bytes(), &hash_cfg()).unwrap_err();
        assert!(matches!(err, IngestError::MalformedRow { line: 2 }));
    }

    #[test]
    fn bad_hash_reports_line_and_value() {
        let input = "id\thash\ndoc-a\tnot-a-number\n";
        let err = read_corpus(input.as_bytes(), &hash_cfg()).unwrap_err();
        match err {
            IngestError::InvalidHash { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "not-a-number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_json_lines_with_string_and_numeric_ids() {
        let input = concat!(
            "{\"id\": \"doc-a\", \"text\": \"the quick brown fox jumps over the lazy dog\"}\n",
            "{\"id\": 7, \"text\": \"the quick brown fox jumps over the lazy dog\"}\n",
        );
        let corpus = read_corpus(input.as_bytes(), &json_cfg()).unwrap();

        // Identical texts fold to the same fingerprint with both ids on it.
        assert_eq!(corpus.len(), 1);
        let hash = *corpus.hashes().iter().next().unwrap();
        let ids: Vec<&str> = corpus.ids_for(hash).collect();
        assert_eq!(ids, vec!["7", "doc-a"]);
    }

    #[test]
    fn json_missing_text_column_is_an_error() {
        let input = "{\"id\": \"doc-a\", \"body\": \"some text\"}\n";
        let err = read_corpus(input.as_bytes(), &json_cfg()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn { line: 1, ref column } if column == "text"
        ));
    }

    #[test]
    fn json_non_object_line_is_an_error() {
        let input = "[1, 2, 3]\n";
        let err = read_corpus(input.as_bytes(), &json_cfg()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { line: 1, .. }));
    }

    #[test]
    fn json_syntax_error_is_reported() {
        let input = "{\"id\": \"doc-a\", \"text\": \n";
        let err = read_corpus(input.as_bytes(), &json_cfg()).unwrap_err();
        assert!(matches!(err, IngestError::Json { line: 1, .. }));
    }

    #[test]
    fn short_text_folds_to_zero() {
        let input = "{\"id\": \"tiny\", \"text\": \"hi\"}\n";
        let corpus = read_corpus(input.as_bytes(), &json_cfg()).unwrap();
        assert!(corpus.hashes().contains(&0));
    }
}
