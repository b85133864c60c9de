//! Snapping configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default distance (in screen pixels) at which two lines count as aligned.
pub const DEFAULT_LINE_THRESHOLD: f64 = 5.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid line threshold: {0}")]
    InvalidThreshold(f64),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Snapping configuration.
///
/// A threshold of zero or below disables snapping without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Maximum distance between two lines for them to align.
    pub line_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_threshold: DEFAULT_LINE_THRESHOLD,
        }
    }
}

impl Config {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line threshold.
    pub fn with_line_threshold(mut self, threshold: f64) -> Self {
        self.line_threshold = threshold;
        self
    }

    /// Check if any line can qualify under this config.
    pub fn snapping_enabled(&self) -> bool {
        self.line_threshold > 0.0
    }

    /// Check if `abs_offset` is within the threshold.
    pub fn accepts(&self, abs_offset: f64) -> bool {
        self.snapping_enabled() && abs_offset <= self.line_threshold
    }

    /// Reject thresholds that are NaN or infinite.
    pub fn validate(self) -> ConfigResult<Self> {
        if self.line_threshold.is_finite() {
            Ok(self)
        } else {
            Err(ConfigError::InvalidThreshold(self.line_threshold))
        }
    }

    /// Parse a config from JSON. Missing keys take default values.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.line_threshold, DEFAULT_LINE_THRESHOLD);
        assert!(config.snapping_enabled());
    }

    #[test]
    fn test_accepts() {
        let config = Config::new().with_line_threshold(5.0);
        assert!(config.accepts(0.0));
        assert!(config.accepts(5.0));
        assert!(!config.accepts(5.000_1));
        assert!(!config.accepts(f64::NAN));
    }

    #[test]
    fn test_non_positive_threshold_disables() {
        for threshold in [0.0, -3.0, f64::NAN] {
            let config = Config::new().with_line_threshold(threshold);
            assert!(!config.snapping_enabled());
            assert!(!config.accepts(0.0));
        }
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(r#"{"lineThreshold": 8}"#).unwrap();
        assert_eq!(config.line_threshold, 8.0);

        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(Config::from_json("not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Config::new().with_line_threshold(f64::INFINITY).validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lineThreshold": 3.5}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.line_threshold, 3.5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
