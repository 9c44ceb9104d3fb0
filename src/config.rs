//! Comparison configuration: the equivalence threshold and engine limits.
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! threshold = 0.2
//! normalize_unicode = false
//! max_depth = 256
//! ```

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration handling.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("equivalence threshold {value} is outside [0.0, 1.0]")]
    #[diagnostic(
        code(adterm::config::threshold_range),
        help(
            "The threshold is the fraction of the longer label's length that may \
             differ. Use 0.0 for exact matching and 1.0 to accept any label of \
             similar length."
        )
    )]
    ThresholdOutOfRange { value: f64 },

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(adterm::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(adterm::config::parse),
        help(
            "The config file must be valid TOML with the optional keys \
             `threshold`, `normalize_unicode` and `max_depth`."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(adterm::config::write),
        help("Check that the parent directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fraction of label length accepted as Levenshtein distance.
///
/// Always within `[0.0, 1.0]`; construction outside the range fails.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Default used by the authoring tool.
    pub const DEFAULT: Self = Self(0.2);
    /// Exact label matching.
    pub const EXACT: Self = Self(0.0);

    pub fn new(value: f64) -> ConfigResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::ThresholdOutOfRange { value })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Maximum accepted edit distance between two labels.
    ///
    /// Lengths are character counts including the quote delimiters; the
    /// two delimiters are excluded before scaling.
    pub fn max_distance(self, quoted_len_a: usize, quoted_len_b: usize) -> usize {
        let longest = quoted_len_a.max(quoted_len_b).saturating_sub(2);
        (longest as f64 * self.0).ceil() as usize
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ConfigError;

    fn try_from(value: f64) -> ConfigResult<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> Self {
        t.0
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a [`CompareEngine`](crate::engine::CompareEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Levenshtein equivalence threshold (default: 0.2).
    pub threshold: Threshold,
    /// Apply Unicode NFC normalization to both terms before comparing.
    pub normalize_unicode: bool,
    /// Maximum nesting depth the recursive comparison will descend.
    pub max_depth: usize,
    /// Require fuzzy parent-child matches to keep the same owner symbol, so
    /// leaves moved under a different gate are not equivalent (default: off).
    pub strict_parent_child: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            normalize_unicode: false,
            max_depth: 256,
            strict_parent_child: false,
        }
    }
}

impl CompareConfig {
    /// Default config with a specific threshold.
    pub fn with_threshold(threshold: f64) -> ConfigResult<Self> {
        Ok(Self {
            threshold: Threshold::new(threshold)?,
            ..Default::default()
        })
    }

    /// Parse from a TOML string. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
