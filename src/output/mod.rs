//! CSV output for the derived tables.
//!
//! Every table is written to two destinations: the tables directory
//! for archival and the web data directory the display layer reads.

use crate::models::SummaryTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes summary tables to both destination directories.
pub struct TableWriter {
    tables_dir: PathBuf,
    web_dir: PathBuf,
}

impl TableWriter {
    /// Create a writer for the two destination directories.
    pub fn new(tables_dir: PathBuf, web_dir: PathBuf) -> Self {
        Self {
            tables_dir,
            web_dir,
        }
    }

    /// Write one table as `<name>.csv` to both directories,
    /// creating them if needed.
    pub fn write(&self, name: &str, table: &SummaryTable) -> Result<()> {
        for dir in [&self.tables_dir, &self.web_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

            let path = dir.join(format!("{}.csv", name));
            write_table(&path, table)
                .with_context(|| format!("Failed to write table to {}", path.display()))?;
            debug!("Wrote {} rows to {}", table.row_count(), path.display());
        }
        Ok(())
    }
}

/// Write a single table to one CSV file.
fn write_table(path: &Path, table: &SummaryTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let record: Vec<String> = row.iter().map(|cell| cell.render()).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::models::Cell;
    use crate::transforms::{self, AnalysisOptions};
    use std::io::Write;

    #[test]
    fn test_write_to_both_directories() {
        let dir = tempfile::tempdir().unwrap();
        let tables_dir = dir.path().join("output_tables");
        let web_dir = dir.path().join("web/data");

        let mut table = SummaryTable::new(["playlist_genre", "avg_popularity"]);
        table.push_row(vec![Cell::Text("pop".to_string()), Cell::Float(62.5)]);
        table.push_row(vec![Cell::Null, Cell::Null]);

        let writer = TableWriter::new(tables_dir.clone(), web_dir.clone());
        writer.write("q1_genre_volume_listener_appeal", &table).unwrap();

        for dir in [&tables_dir, &web_dir] {
            let path = dir.join("q1_genre_volume_listener_appeal.csv");
            let content = fs::read_to_string(&path).unwrap();
            assert_eq!(
                content,
                "playlist_genre,avg_popularity\npop,62.5\n,\n"
            );
        }
    }

    #[test]
    fn test_full_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spotify_songs.csv");
        let mut file = fs::File::create(&input).unwrap();
        writeln!(
            file,
            "track_id,track_name,track_popularity,track_album_release_date,\
             playlist_genre,danceability,energy,valence,tempo,acousticness,instrumentalness"
        )
        .unwrap();
        writeln!(file, "a1,Song A,80,2019-06-14,pop,0.7,0.8,0.6,120,0.1,0.0").unwrap();
        writeln!(file, "a2,Song B,40,2001-03-02,pop,0.5,0.6,0.4,98.5,0.3,0.1").unwrap();
        writeln!(file, "a3,Song C,65,1975,rock,0.4,0.9,0.5,140,0.2,0.5").unwrap();
        writeln!(file, "a4,Song D,20,1982-11,rock,0.3,0.7,0.3,130,0.4,0.2").unwrap();
        writeln!(file, "a5,Song E,55,,,0.6,0.5,0.7,110,0.6,0.3").unwrap();
        drop(file);

        let dataset = Dataset::load(&input).unwrap();
        let tables_dir = dir.path().join("output_tables");
        let web_dir = dir.path().join("web/data");
        let writer = TableWriter::new(tables_dir.clone(), web_dir.clone());
        let options = AnalysisOptions::default();

        for transform in transforms::ALL {
            let table = (transform.run)(&dataset, &options);
            writer.write(transform.name, &table).unwrap();
        }

        // All seven tables land in both directories.
        for dir in [&tables_dir, &web_dir] {
            let mut names: Vec<String> = fs::read_dir(dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect();
            names.sort();
            assert_eq!(names.len(), 7);
            assert_eq!(names[0], "q1_genre_volume_listener_appeal.csv");
            assert_eq!(names[6], "q7_feature_diversity.csv");
        }

        // Spot-check the genre table: pop, rock, missing genre last.
        let q1 = fs::read_to_string(tables_dir.join("q1_genre_volume_listener_appeal.csv"))
            .unwrap();
        let lines: Vec<&str> = q1.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("pop,2,"));
        assert!(lines[2].starts_with("rock,2,"));
        assert!(lines[3].starts_with(",1,"));

        // Yearly table excludes the undated row and is sorted by year.
        let q5 = fs::read_to_string(tables_dir.join("q5_evolution_energy_tempo.csv")).unwrap();
        let years: Vec<&str> = q5
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(years, vec!["1975", "1982", "2001", "2019"]);
    }
}
