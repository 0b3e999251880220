//! Dataset loading and access.
//!
//! This module reads the input CSV into an in-memory record set and
//! provides the grouping helpers the transforms share. The only fatal
//! failure mode is a missing or unreadable input file; individual
//! missing fields become `None` and flow through the aggregations.

use crate::models::Track;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read dataset: {source}")]
    Read {
        #[source]
        source: csv::Error,
    },

    #[error("malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: csv::Error,
    },
}

/// The full in-memory record set.
#[derive(Debug, Clone)]
pub struct Dataset {
    tracks: Vec<Track>,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    ///
    /// The existence check runs before any parsing so a missing input
    /// surfaces as a clear fatal error, not a read failure mid-stream.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|source| DatasetError::Read { source })?;

        let mut tracks = Vec::new();
        for (index, record) in reader.deserialize::<Track>().enumerate() {
            // Line 1 is the header row.
            let mut track = record.map_err(|source| DatasetError::Parse {
                line: index + 2,
                source,
            })?;
            track.release_year = track
                .track_album_release_date
                .as_deref()
                .and_then(parse_release_year);
            tracks.push(track);
        }

        debug!("Parsed {} track records", tracks.len());
        Ok(Self { tracks })
    }

    /// Build a dataset from records directly.
    #[allow(dead_code)] // Constructor for synthetic datasets in tests
    pub fn from_tracks(mut tracks: Vec<Track>) -> Self {
        for track in &mut tracks {
            if track.release_year.is_none() {
                track.release_year = track
                    .track_album_release_date
                    .as_deref()
                    .and_then(parse_release_year);
            }
        }
        Self { tracks }
    }

    /// All track records.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks grouped by playlist genre, sorted by genre name with the
    /// missing-genre group last. Missing genre is kept as its own group
    /// rather than dropped.
    pub fn genre_groups(&self) -> Vec<(Option<&str>, Vec<&Track>)> {
        let mut groups: BTreeMap<Option<&str>, Vec<&Track>> = BTreeMap::new();
        for track in &self.tracks {
            groups
                .entry(track.playlist_genre.as_deref())
                .or_default()
                .push(track);
        }

        let mut ordered: Vec<_> = groups.into_iter().collect();
        ordered.sort_by(|a, b| match (&a.0, &b.0) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(x), Some(y)) => x.cmp(y),
        });
        ordered
    }
}

/// Extract the release year from a raw date string.
///
/// The dataset mixes full dates with year-month and bare-year entries.
/// Anything else (including out-of-range months) yields `None`, and the
/// row is excluded from year-based aggregations downstream.
pub fn parse_release_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }

    let mut parts = raw.split('-');
    let year = parts.next()?;
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;

    match parts.next() {
        None => Some(year),
        Some(month) => {
            if parts.next().is_some() {
                // Three components that failed the full-date parse above.
                return None;
            }
            let month: u32 = month.parse().ok()?;
            (1..=12).contains(&month).then_some(year)
        }
    }
}
