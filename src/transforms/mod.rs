//! The seven summary-table transforms.
//!
//! Each transform is a pure function over the loaded dataset producing
//! one small table. The registry drives the run loop and `--only`
//! selection; output files are named after the registry entries.

pub mod correlation;
pub mod diversity;
pub mod genre;
pub mod hits;
pub mod temporal;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::models::{SummaryTable, Track, AUDIO_FEATURES};
use anyhow::{bail, Result};

/// Tunable analysis parameters, resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Popularity quantile separating hits from non-hits.
    pub hit_quantile: f64,
    /// Audio features compared in the hit and diversity tables.
    pub features: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            hit_quantile: 0.9,
            features: AUDIO_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&AnalysisConfig> for AnalysisOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            hit_quantile: config.hit_quantile,
            features: config.diversity_features.clone(),
        }
    }
}

/// A named transform in the registry.
#[derive(Debug)]
pub struct Transform {
    /// Output file stem and `--only` selector.
    pub name: &'static str,
    /// One-line description for `--list` output.
    pub description: &'static str,
    pub run: fn(&Dataset, &AnalysisOptions) -> SummaryTable,
}

/// All transforms, in output order.
pub const ALL: &[Transform] = &[
    Transform {
        name: "q1_genre_volume_listener_appeal",
        description: "track count and average popularity per genre",
        run: genre::genre_volume_listener_appeal,
    },
    Transform {
        name: "q2_energy_danceability_corr",
        description: "energy/danceability correlation per genre",
        run: correlation::energy_danceability_corr,
    },
    Transform {
        name: "q3_valence_tempo_popularity",
        description: "normalized valence and tempo vs popularity",
        run: correlation::valence_tempo_popularity,
    },
    Transform {
        name: "q4_acoustic_instrumental_by_genre_type",
        description: "acousticness and instrumentalness by genre era",
        run: temporal::acoustic_instrumental_by_genre_type,
    },
    Transform {
        name: "q5_evolution_energy_tempo",
        description: "average tempo and energy per release year",
        run: temporal::evolution_energy_tempo,
    },
    Transform {
        name: "q6_hit_vs_non_hit",
        description: "feature means for hits vs non-hits",
        run: hits::hit_vs_non_hit,
    },
    Transform {
        name: "q7_feature_diversity",
        description: "spread of normalized features per genre",
        run: diversity::feature_diversity,
    },
];

/// Resolve a `--only` selection against the registry.
///
/// The result keeps registry order regardless of the order names were
/// given in; an unknown name is an error.
pub fn select(names: &[String]) -> Result<Vec<&'static Transform>> {
    for name in names {
        if !ALL.iter().any(|t| t.name == name) {
            bail!(
                "unknown transform '{}' (run with --list to see available names)",
                name
            );
        }
    }
    Ok(ALL
        .iter()
        .filter(|t| names.iter().any(|n| n == t.name))
        .collect())
}

/// Collect present values of one column across tracks.
pub(crate) fn collect<'a, I, F>(tracks: I, accessor: F) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Track>,
    F: Fn(&Track) -> Option<f64>,
{
    tracks.into_iter().filter_map(|t| accessor(t)).collect()
}

/// Collect rows where both columns are present, as pairs.
pub(crate) fn collect_pairs<'a, I, F, G>(tracks: I, first: F, second: G) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = &'a Track>,
    F: Fn(&Track) -> Option<f64>,
    G: Fn(&Track) -> Option<f64>,
{
    tracks
        .into_iter()
        .filter_map(|t| Some((first(t)?, second(t)?)))
        .collect()
}
