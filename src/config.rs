//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.trackstats.toml` files.

use crate::models::AUDIO_FEATURES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input dataset settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Output destination settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Input dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the tracks CSV.
    #[serde(default = "default_input_path")]
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> String {
    "web/data/spotify_songs.csv".to_string()
}

/// Output destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for the archival table copies.
    #[serde(default = "default_tables_dir")]
    pub tables_dir: String,

    /// Directory the display layer reads from.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tables_dir: default_tables_dir(),
            web_dir: default_web_dir(),
        }
    }
}

fn default_tables_dir() -> String {
    "output_tables".to_string()
}

fn default_web_dir() -> String {
    "web/data".to_string()
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Popularity quantile separating hits from non-hits.
    #[serde(default = "default_hit_quantile")]
    pub hit_quantile: f64,

    /// Features compared in the hit and diversity tables.
    #[serde(default = "default_diversity_features")]
    pub diversity_features: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hit_quantile: default_hit_quantile(),
            diversity_features: default_diversity_features(),
        }
    }
}

fn default_hit_quantile() -> f64 {
    0.9
}

fn default_diversity_features() -> Vec<String> {
    AUDIO_FEATURES.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".trackstats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.path = input.display().to_string();
        }
        if let Some(ref dir) = args.output_dir {
            self.output.tables_dir = dir.display().to_string();
        }
        if let Some(ref dir) = args.web_dir {
            self.output.web_dir = dir.display().to_string();
        }
        if let Some(quantile) = args.hit_quantile {
            self.analysis.hit_quantile = quantile;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Resolved input path.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.input.path)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
