//! Configuration for the input readers.

use serde::{Deserialize, Serialize};

use sdp_simhash::{DEFAULT_WINDOW, FeatureConfig};

use crate::error::IngestError;

/// Input format for the reader.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Tab-separated `id`/`hash` rows with a header line.
    #[default]
    Hash,
    /// One JSON object per line; the text column is window-hashed and
    /// folded into a fingerprint.
    Json,
}

impl InputFormat {
    /// Parse a format name as given on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "hash" => Some(Self::Hash),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reader configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Input format.
    #[serde(default)]
    pub format: InputFormat,
    /// Column holding the text to fingerprint (`json` format only).
    #[serde(default)]
    pub text_column: Option<String>,
    /// Column holding the record identifier (`json` format only).
    #[serde(default)]
    pub id_column: Option<String>,
    /// Read at most this many records; 0 means no limit.
    #[serde(default)]
    pub sample: usize,
    /// Window width for text hashing.
    #[serde(default = "InputConfig::default_window")]
    pub window: usize,
    /// Seed for the per-window hash.
    #[serde(default)]
    pub seed: u64,
}

impl InputConfig {
    pub(crate) fn default_window() -> usize {
        DEFAULT_WINDOW
    }

    /// Validate the configuration before reading.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.window == 0 {
            return Err(IngestError::InvalidConfig("window must be >= 1".into()));
        }
        if self.format == InputFormat::Json {
            if self.text_column.is_none() {
                return Err(IngestError::InvalidConfig(
                    "text_column is required for json input".into(),
                ));
            }
            if self.id_column.is_none() {
                return Err(IngestError::InvalidConfig(
                    "id_column is required for json input".into(),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn feature_config(&self) -> FeatureConfig {
        FeatureConfig {
            window: self.window,
            seed: self.seed,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            format: InputFormat::default(),
            text_column: None,
            id_column: None,
            sample: 0,
            window: DEFAULT_WINDOW,
            seed: 0,
        }
    }
}
