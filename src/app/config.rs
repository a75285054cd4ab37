//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::feature::SequenceType;
use crate::geometry::distance::OrientationStyle;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Store settings
    pub store: StoreConfig,
    /// Recognition output settings
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the persisted gesture store
    pub path: PathBuf,
    /// Orientation tolerance used when extracting new instances
    pub orientation_style: OrientationStyle,
    /// Sampling strategy used when extracting new instances
    pub sequence_type: SequenceType,
}

/// Recognition output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Number of ranked predictions to report
    pub top_k: usize,
    /// Hide predictions scoring below this (0 = show all)
    pub min_score: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_data_dir().join("gestures.bin"),
            orientation_style: OrientationStyle::Sensitive2,
            sequence_type: SequenceType::Sensitive,
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.0,
        }
    }
}

/// Directory holding the config file and the default store.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".gesture-recognizer"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.store.path.as_os_str().is_empty() {
            return Err(crate::Error::Config(
                "store.path must not be empty".to_string(),
            ));
        }
        if self.recognition.top_k == 0 {
            return Err(crate::Error::Config(format!(
                "recognition.top_k must be > 0, got {}",
                self.recognition.top_k
            )));
        }
        if self.recognition.min_score < 0.0 {
            return Err(crate::Error::Config(format!(
                "recognition.min_score must be >= 0, got {}",
                self.recognition.min_score
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        default_data_dir().join("config.toml")
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
