//! Per-genre volume and listener appeal.

use super::{collect, AnalysisOptions};
use crate::dataset::Dataset;
use crate::models::{Cell, SummaryTable};
use crate::stats;

/// Track count and average popularity per playlist genre.
///
/// The count covers tracks with an id; the average skips missing
/// popularity values and is empty for a group with none.
pub fn genre_volume_listener_appeal(dataset: &Dataset, _options: &AnalysisOptions) -> SummaryTable {
    let mut table = SummaryTable::new(["playlist_genre", "track_count", "avg_popularity"]);

    for (genre, tracks) in dataset.genre_groups() {
        let track_count = tracks.iter().filter(|t| t.track_id.is_some()).count();
        let popularity = collect(tracks.iter().copied(), |t| t.track_popularity);

        table.push_row(vec![
            Cell::text_or_null(genre),
            Cell::Int(track_count as i64),
            Cell::from(stats::mean(&popularity)),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn track(genre: Option<&str>, id: Option<&str>, popularity: Option<f64>) -> Track {
        Track {
            playlist_genre: genre.map(String::from),
            track_id: id.map(String::from),
            track_popularity: popularity,
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_and_means_per_genre() {
        let dataset = Dataset::from_tracks(vec![
            track(Some("pop"), Some("a"), Some(80.0)),
            track(Some("pop"), Some("b"), Some(60.0)),
            track(Some("rock"), Some("c"), Some(40.0)),
            track(None, Some("d"), Some(10.0)),
        ]);

        let table = genre_volume_listener_appeal(&dataset, &AnalysisOptions::default());

        // One row per distinct group key, missing genre included.
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0][0], Cell::Text("pop".to_string()));
        assert_eq!(table.rows[0][1], Cell::Int(2));
        assert_eq!(table.rows[0][2], Cell::Float(70.0));
        assert_eq!(table.rows[1][0], Cell::Text("rock".to_string()));
        assert_eq!(table.rows[2][0], Cell::Null);
        assert_eq!(table.rows[2][2], Cell::Float(10.0));
    }

    #[test]
    fn test_count_skips_missing_track_id() {
        let dataset = Dataset::from_tracks(vec![
            track(Some("pop"), Some("a"), None),
            track(Some("pop"), None, None),
        ]);

        let table = genre_volume_listener_appeal(&dataset, &AnalysisOptions::default());

        assert_eq!(table.rows[0][1], Cell::Int(1));
        // No popularity values in the group: empty cell, not an error.
        assert_eq!(table.rows[0][2], Cell::Null);
    }
}
