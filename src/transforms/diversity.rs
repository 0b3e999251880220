//! Per-genre feature diversity.

use super::{collect, AnalysisOptions};
use crate::dataset::Dataset;
use crate::models::{Cell, SummaryTable};
use crate::stats;

/// Average spread of min-max-normalized features per genre.
///
/// Each feature is scaled to [0, 1] over the whole dataset, then each
/// genre gets the sample standard deviation of every scaled feature,
/// averaged into one diversity score. Constant features have no defined
/// scaling and drop out; a genre where nothing is defined gets an
/// empty cell.
pub fn feature_diversity(dataset: &Dataset, options: &AnalysisOptions) -> SummaryTable {
    // Dataset-wide ranges, computed once.
    let ranges: Vec<(&str, Option<(f64, f64)>)> = options
        .features
        .iter()
        .map(|feature| {
            let values = collect(dataset.tracks(), |t| t.feature(feature));
            (feature.as_str(), stats::min_max(&values))
        })
        .collect();

    let mut table = SummaryTable::new(["playlist_genre", "feature_diversity"]);

    for (genre, tracks) in dataset.genre_groups() {
        let spreads: Vec<f64> = ranges
            .iter()
            .filter_map(|(feature, range)| {
                let (min, max) = (*range)?;
                if max <= min {
                    return None;
                }
                let normalized: Vec<f64> = collect(tracks.iter().copied(), |t| t.feature(feature))
                    .into_iter()
                    .map(|v| (v - min) / (max - min))
                    .collect();
                stats::sample_std(&normalized)
            })
            .collect();

        table.push_row(vec![
            Cell::text_or_null(genre),
            Cell::from(stats::mean(&spreads)),
        ]);
    }

    table
}
