//! Hit vs non-hit feature comparison.

use super::{collect, AnalysisOptions};
use crate::dataset::Dataset;
use crate::models::{Cell, SummaryTable, Track};
use crate::stats;

/// Feature means for hits vs non-hits.
///
/// The threshold is one quantile of the present popularity values
/// (0.9 by default) and the same value classifies every track: a track
/// is a hit when its popularity is present and at or above it. With no
/// popularity data at all, everything is a non-hit.
pub fn hit_vs_non_hit(dataset: &Dataset, options: &AnalysisOptions) -> SummaryTable {
    let popularity = collect(dataset.tracks(), |t| t.track_popularity);
    let threshold = stats::quantile(&popularity, options.hit_quantile);

    let mut hit_tracks: Vec<&Track> = Vec::new();
    let mut non_hit_tracks: Vec<&Track> = Vec::new();
    for track in dataset.tracks() {
        let is_hit = match (threshold, track.track_popularity) {
            (Some(threshold), Some(popularity)) => popularity >= threshold,
            _ => false,
        };
        if is_hit {
            hit_tracks.push(track);
        } else {
            non_hit_tracks.push(track);
        }
    }

    let mut columns = vec!["hit".to_string()];
    columns.extend(options.features.iter().cloned());
    let mut table = SummaryTable::new(columns);

    // Label order is descending, so Non-Hit comes first.
    for (label, tracks) in [("Non-Hit", non_hit_tracks), ("Hit", hit_tracks)] {
        if tracks.is_empty() {
            continue;
        }
        let mut row = vec![Cell::Text(label.to_string())];
        for feature in &options.features {
            let values = collect(tracks.iter().copied(), |t| t.feature(feature));
            row.push(Cell::from(stats::mean(&values)));
        }
        table.push_row(row);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(popularity: f64, energy: f64) -> Track {
        Track {
            track_popularity: Some(popularity),
            energy: Some(energy),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_uses_quantile_threshold() {
        // Popularity 1..=10: the 0.9 quantile interpolates to 9.1,
        // so only the track at 10 is a hit.
        let tracks: Vec<Track> = (1..=10).map(|p| track(p as f64, p as f64 / 10.0)).collect();
        let dataset = Dataset::from_tracks(tracks);

        let table = hit_vs_non_hit(&dataset, &AnalysisOptions::default());

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], Cell::Text("Non-Hit".to_string()));
        assert_eq!(table.rows[1][0], Cell::Text("Hit".to_string()));

        let energy_col = table.column_index("energy").unwrap();
        assert_eq!(table.rows[1][energy_col], Cell::Float(1.0));
        let non_hit_energy = table.rows[0][energy_col].as_f64().unwrap();
        assert!((non_hit_energy - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_threshold_consistency() {
        let tracks: Vec<Track> = (0..50).map(|p| track(p as f64, 0.5)).collect();
        let dataset = Dataset::from_tracks(tracks);
        let options = AnalysisOptions::default();

        let popularity = collect(dataset.tracks(), |t| t.track_popularity);
        let threshold = stats::quantile(&popularity, options.hit_quantile).unwrap();
        let expected_hits = popularity.iter().filter(|p| **p >= threshold).count();

        let table = hit_vs_non_hit(&dataset, &options);
        // Recover hit count from group sizes: 50 tracks total.
        assert_eq!(table.row_count(), 2);
        assert!(expected_hits > 0);
        assert!(expected_hits < 50);
    }

    #[test]
    fn test_constant_popularity_all_hits() {
        let tracks: Vec<Track> = (0..4).map(|_| track(50.0, 0.5)).collect();
        let dataset = Dataset::from_tracks(tracks);

        let table = hit_vs_non_hit(&dataset, &AnalysisOptions::default());

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0][0], Cell::Text("Hit".to_string()));
    }

    #[test]
    fn test_missing_popularity_is_non_hit() {
        let dataset = Dataset::from_tracks(vec![
            track(10.0, 0.2),
            track(90.0, 0.8),
            Track {
                track_popularity: None,
                energy: Some(0.5),
                ..Default::default()
            },
        ]);

        let table = hit_vs_non_hit(&dataset, &AnalysisOptions::default());

        assert_eq!(table.rows[0][0], Cell::Text("Non-Hit".to_string()));
        let energy_col = table.column_index("energy").unwrap();
        // Non-hits: the 10.0 track and the unlabeled one.
        let non_hit_energy = table.rows[0][energy_col].as_f64().unwrap();
        assert!((non_hit_energy - 0.35).abs() < 1e-10);
    }
}
