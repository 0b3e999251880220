//! Data models for the statistics pipeline.
//!
//! This module contains the core data structures used throughout
//! the application: the input track record and the derived tables.

use serde::Deserialize;

/// The audio features compared across genres, hits, and years.
pub const AUDIO_FEATURES: [&str; 5] = ["energy", "danceability", "valence", "tempo", "acousticness"];

/// A single music track record from the input CSV.
///
/// Only the columns the transforms consume are deserialized; any other
/// columns in the file are ignored. Empty fields become `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Track identifier (counted per genre).
    pub track_id: Option<String>,
    /// Popularity score, typically 0-100.
    pub track_popularity: Option<f64>,
    /// Raw release date string: `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`.
    pub track_album_release_date: Option<String>,
    /// Categorical grouping key for most aggregations.
    pub playlist_genre: Option<String>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    /// Release year parsed from `track_album_release_date` at load time.
    #[serde(skip)]
    pub release_year: Option<i32>,
}

impl Track {
    /// Look up an audio feature by column name.
    pub fn feature(&self, name: &str) -> Option<f64> {
        match name {
            "energy" => self.energy,
            "danceability" => self.danceability,
            "valence" => self.valence,
            "tempo" => self.tempo,
            "acousticness" => self.acousticness,
            "instrumentalness" => self.instrumentalness,
            _ => None,
        }
    }
}

/// A single value in a derived table.
///
/// `Null` renders as an empty CSV field, which is how undefined
/// aggregates (empty groups, degenerate correlations) are represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
}

impl Cell {
    /// Render the cell as a CSV field.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(v) if v.is_nan() => String::new(),
            Cell::Float(v) => format!("{}", v),
            Cell::Null => String::new(),
        }
    }

    /// Build a text cell, or `Null` when the value is missing.
    pub fn text_or_null(value: Option<&str>) -> Self {
        match value {
            Some(s) => Cell::Text(s.to_string()),
            None => Cell::Null,
        }
    }

    /// Numeric view of the cell, for assertions and dry-run summaries.
    #[allow(dead_code)] // Utility for inspecting table values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Cell::Float(v),
            None => Cell::Null,
        }
    }
}

/// A small derived table produced by one transform: named columns
/// plus rows of cells. Immutable once built, written out as CSV.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    /// Column names, in output order.
    pub columns: Vec<String>,
    /// Data rows; each row has one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl SummaryTable {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by name.
    #[allow(dead_code)] // Utility for table inspection
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
