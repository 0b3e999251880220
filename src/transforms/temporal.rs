//! Release-date-driven tables: genre eras and yearly trends.

use super::{collect, AnalysisOptions};
use crate::dataset::Dataset;
use crate::models::{Cell, SummaryTable, Track};
use crate::stats;
use std::collections::BTreeMap;

/// Mean acousticness and instrumentalness by genre era.
///
/// A genre is `Modern` when its median release year is at or past the
/// overall median, `Traditional` when it is earlier, and `Unknown` when
/// the genre is missing or has no dated rows. Medians are computed over
/// rows that have both a genre and a release year; the final grouping
/// covers every row.
pub fn acoustic_instrumental_by_genre_type(
    dataset: &Dataset,
    _options: &AnalysisOptions,
) -> SummaryTable {
    let mut years_by_genre: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut all_years: Vec<f64> = Vec::new();
    for track in dataset.tracks() {
        if let (Some(genre), Some(year)) = (track.playlist_genre.as_deref(), track.release_year) {
            years_by_genre.entry(genre).or_default().push(year as f64);
            all_years.push(year as f64);
        }
    }

    let overall_median = stats::median(&all_years);
    let genre_median: BTreeMap<&str, f64> = years_by_genre
        .into_iter()
        .filter_map(|(genre, years)| Some((genre, stats::median(&years)?)))
        .collect();

    let classify = |track: &Track| -> &'static str {
        let Some(genre) = track.playlist_genre.as_deref() else {
            return "Unknown";
        };
        match (genre_median.get(genre), overall_median) {
            (Some(median), Some(overall)) if *median >= overall => "Modern",
            (Some(_), Some(_)) => "Traditional",
            _ => "Unknown",
        }
    };

    // BTreeMap iteration gives the classes in ascending name order.
    let mut groups: BTreeMap<&'static str, Vec<&Track>> = BTreeMap::new();
    for track in dataset.tracks() {
        groups.entry(classify(track)).or_default().push(track);
    }

    let mut table = SummaryTable::new(["genre_type", "acousticness_mean", "instrumentalness_mean"]);
    for (genre_type, tracks) in groups {
        let acousticness = collect(tracks.iter().copied(), |t| t.acousticness);
        let instrumentalness = collect(tracks.iter().copied(), |t| t.instrumentalness);
        table.push_row(vec![
            Cell::Text(genre_type.to_string()),
            Cell::from(stats::mean(&acousticness)),
            Cell::from(stats::mean(&instrumentalness)),
        ]);
    }

    table
}

/// Average tempo and energy per release year, ascending.
///
/// Rows without a parseable release date are excluded.
pub fn evolution_energy_tempo(dataset: &Dataset, _options: &AnalysisOptions) -> SummaryTable {
    let mut by_year: BTreeMap<i32, Vec<&Track>> = BTreeMap::new();
    for track in dataset.tracks() {
        if let Some(year) = track.release_year {
            by_year.entry(year).or_default().push(track);
        }
    }

    let mut table = SummaryTable::new(["year", "avg_tempo", "avg_energy"]);
    for (year, tracks) in by_year {
        let tempo = collect(tracks.iter().copied(), |t| t.tempo);
        let energy = collect(tracks.iter().copied(), |t| t.energy);
        table.push_row(vec![
            Cell::Int(year as i64),
            Cell::from(stats::mean(&tempo)),
            Cell::from(stats::mean(&energy)),
        ]);
    }

    table
}
