//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values. Running with no flags
//! reproduces the fixed-path behavior of the original pipeline.

use clap::Parser;
use std::path::PathBuf;

/// TrackStats - descriptive statistics over a music track dataset
///
/// Computes seven summary tables (genre volume, feature correlations,
/// temporal trends, hit comparison, feature diversity) from one CSV of
/// tracks and writes each as a small CSV for downstream display.
///
/// Examples:
///   trackstats
///   trackstats --input data/spotify_songs.csv --output-dir tables
///   trackstats --only q1_genre_volume_listener_appeal,q6_hit_vs_non_hit
///   trackstats --dry-run --verbose
///   trackstats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the input tracks CSV
    ///
    /// Defaults to web/data/spotify_songs.csv (or the config file value).
    #[arg(short, long, value_name = "FILE", env = "TRACKSTATS_INPUT")]
    pub input: Option<PathBuf>,

    /// Directory for the archival copies of the summary tables
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory the display layer reads the tables from
    #[arg(long, value_name = "DIR")]
    pub web_dir: Option<PathBuf>,

    /// Run only these transforms (comma-separated names)
    ///
    /// Example: --only q1_genre_volume_listener_appeal,q5_evolution_energy_tempo
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Popularity quantile separating hits from non-hits (0-1 exclusive)
    #[arg(long, value_name = "Q")]
    pub hit_quantile: Option<f64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .trackstats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List the available transforms and exit
    #[arg(long)]
    pub list: bool,

    /// Dry run: load the dataset and compute row counts without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .trackstats.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config and --list
        if self.init_config || self.list {
            return Ok(());
        }

        if let Some(q) = self.hit_quantile {
            if !(q > 0.0 && q < 1.0) {
                return Err("Hit quantile must be strictly between 0 and 1".to_string());
            }
        }

        if let Some(ref only) = self.only {
            if only.iter().any(|name| name.trim().is_empty()) {
                return Err("--only contains an empty transform name".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: None,
            output_dir: None,
            web_dir: None,
            only: None,
            hit_quantile: None,
            config: None,
            list: false,
            dry_run: false,
            init_config: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_defaults_validate() {
        let args = make_args();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_bad_quantile() {
        let mut args = make_args();
        args.hit_quantile = Some(1.0);
        assert!(args.validate().is_err());

        args.hit_quantile = Some(0.0);
        assert!(args.validate().is_err());

        args.hit_quantile = Some(0.9);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_only_name() {
        let mut args = make_args();
        args.only = Some(vec!["q1_genre_volume_listener_appeal".to_string(), "".to_string()]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_list() {
        let mut args = make_args();
        args.list = true;
        args.hit_quantile = Some(5.0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
