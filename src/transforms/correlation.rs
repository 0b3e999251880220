//! Feature correlation tables.

use super::{collect, collect_pairs, AnalysisOptions};
use crate::dataset::Dataset;
use crate::models::{Cell, SummaryTable};
use crate::stats;

/// Pearson correlation of energy vs danceability per genre.
///
/// A group where either column has fewer than two distinct values gets
/// an empty cell; so does a degenerate paired sample.
pub fn energy_danceability_corr(dataset: &Dataset, _options: &AnalysisOptions) -> SummaryTable {
    let mut table = SummaryTable::new(["playlist_genre", "corr_energy_danceability"]);

    for (genre, tracks) in dataset.genre_groups() {
        let energy = collect(tracks.iter().copied(), |t| t.energy);
        let danceability = collect(tracks.iter().copied(), |t| t.danceability);

        let correlation = if stats::distinct_count(&energy) < 2
            || stats::distinct_count(&danceability) < 2
        {
            Cell::Null
        } else {
            let pairs = collect_pairs(tracks.iter().copied(), |t| t.energy, |t| t.danceability);
            Cell::from(stats::pearson(&pairs))
        };

        table.push_row(vec![Cell::text_or_null(genre), correlation]);
    }

    table
}

/// Correlation of z-score-normalized valence and tempo with popularity.
///
/// Normalization uses the population standard deviation over the whole
/// dataset; a zero-variance feature has no defined normalization and
/// yields an empty correlation.
pub fn valence_tempo_popularity(dataset: &Dataset, _options: &AnalysisOptions) -> SummaryTable {
    let mut table = SummaryTable::new(["feature", "correlation_with_popularity"]);

    for feature in ["valence", "tempo"] {
        let values = collect(dataset.tracks(), |t| t.feature(feature));

        let correlation = match (stats::mean(&values), stats::population_std(&values)) {
            (Some(mean), Some(std)) if std > 0.0 => {
                let pairs: Vec<(f64, f64)> = dataset
                    .tracks()
                    .iter()
                    .filter_map(|t| {
                        let value = t.feature(feature)?;
                        let popularity = t.track_popularity?;
                        Some(((value - mean) / std, popularity))
                    })
                    .collect();
                Cell::from(stats::pearson(&pairs))
            }
            _ => Cell::Null,
        };

        table.push_row(vec![Cell::Text(feature.to_string()), correlation]);
    }

    table
}
