//! YAML configuration file support for simdup.
//!
//! A single YAML file can define the search parameters together with the
//! input and output settings, loaded at runtime via `--config`; command
//! line flags override whatever the file sets.
//!
//! ## Example YAML configuration
//!
//! ```yaml
//! # simdup pipeline configuration
//! version: "1.0"
//!
//! search:
//!   blocks: 6
//!   distance: 3
//!
//! input:
//!   path: corpus.jsonl
//!   format: json
//!   text_column: text
//!   id_column: id
//!   window: 5
//!
//! output:
//!   path: clusters.tsv
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sdp_ingest::InputConfig;

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for a simdup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimdupConfig {
    /// Configuration format version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Search parameters.
    #[serde(default)]
    pub search: SearchYamlConfig,

    /// Input reader settings.
    #[serde(default)]
    pub input: InputYamlConfig,

    /// Output writer settings.
    #[serde(default)]
    pub output: OutputYamlConfig,
}

impl SimdupConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SimdupConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Only structural checks happen here; required values that may still
    /// be supplied by command-line flags (blocks, distance, paths) are
    /// checked by the binary once flags have been merged in.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }
        self.search.validate()?;
        self.input.validate()?;
        Ok(())
    }
}

impl Default for SimdupConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            search: SearchYamlConfig::default(),
            input: InputYamlConfig::default(),
            output: OutputYamlConfig::default(),
        }
    }
}

/// Search parameters: block count and distance threshold.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchYamlConfig {
    /// Number of bit blocks; 0 means "must be given on the command line".
    #[serde(default)]
    pub blocks: usize,

    /// Maximum Hamming distance of a match; 0 means "must be given on the
    /// command line".
    #[serde(default)]
    pub distance: usize,
}

impl SearchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.blocks > 64 {
            return Err(ConfigLoadError::Validation(
                "search.blocks must be <= 64".to_string(),
            ));
        }
        if self.blocks > 0 && self.distance >= self.blocks {
            return Err(ConfigLoadError::Validation(format!(
                "search.blocks ({}) must be greater than search.distance ({})",
                self.blocks, self.distance
            )));
        }
        Ok(())
    }
}

/// Input reader settings plus the source path.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputYamlConfig {
    /// Path to the input, `-` for stdin.
    #[serde(default)]
    pub path: Option<String>,

    /// Reader settings (format, columns, sampling, window, seed).
    #[serde(flatten)]
    pub reader: InputConfig,
}

impl InputYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.reader.window == 0 {
            return Err(ConfigLoadError::Validation(
                "input.window must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Output writer settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputYamlConfig {
    /// Path to the output, `-` for stdout.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}
