//! Parser for MovieLens-style CSV files.
//!
//! - ratings.csv: userId,movieId,rating,timestamp
//! - movies.csv: movieId,title,genres
//!
//! Both files have a header row. Columns are matched by header name, so
//! extra columns are ignored and column order does not matter.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Deserialize every record of a headed CSV file
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| DataLoadError::from_csv(&file_name, e))?;
        records.push(record);
    }
    Ok(records)
}

/// Parse the ratings.csv file
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    read_records(path)
}

/// Parse the movies.csv file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    read_records(path)
}
