//! Building a `RatingDataset` from files.
//!
//! - Parse ratings.csv and movies.csv in parallel
//! - Inner-join ratings with movie titles on movieId
//! - Validate rating values

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

impl RatingDataset {
    /// Load `ratings.csv` and `movies.csv` from a directory and join them.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading rating dataset from {:?}", data_dir);

        let ratings_path = data_dir.join("ratings.csv");
        let movies_path = data_dir.join("movies.csv");

        let (records, movies) = rayon::join(
            || parser::parse_ratings(&ratings_path),
            || parser::parse_movies(&movies_path),
        );
        let records = records?;
        let movies = movies?;

        info!(
            "Parsed {} ratings and {} movies",
            records.len(),
            movies.len()
        );

        let dataset = Self::join(records, movies)?;

        let (users, movies, ratings) = dataset.counts();
        info!(
            "Dataset ready: {} users, {} rated movies, {} ratings",
            users, movies, ratings
        );
        Ok(dataset)
    }

    /// Join raw rating records with movie titles on movieId.
    ///
    /// Ratings of movies missing from `movies` are dropped. Every kept rating
    /// is validated before the dataset is built.
    pub fn join(records: Vec<RatingRecord>, movies: Vec<Movie>) -> Result<Self> {
        let titles: HashMap<MovieId, Arc<str>> = movies
            .into_iter()
            .map(|m| (m.id, Arc::from(m.title)))
            .collect();

        let mut ratings = Vec::with_capacity(records.len());
        let mut dropped = 0usize;
        for record in records {
            validate_rating(&record)?;
            match titles.get(&record.movie_id) {
                Some(title) => ratings.push(Rating {
                    user_id: record.user_id,
                    movie_id: record.movie_id,
                    rating: record.rating,
                    title: Arc::clone(title),
                }),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!("Dropped {} ratings with no matching movie title", dropped);
        }

        Ok(Self::from_ratings(ratings))
    }

    /// Check every rating already in the dataset.
    ///
    /// Datasets built with `from_ratings` skip the checks `join` makes, so
    /// anything deriving a matrix from them must call this first.
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if check_value(rating.rating).is_err() {
                return Err(DataLoadError::ValidationError(format!(
                    "user {} rated movie {} with {}, expected a value in (0, {}]",
                    rating.user_id, rating.movie_id, rating.rating, MAX_RATING
                )));
            }
        }
        Ok(())
    }
}

fn validate_rating(record: &RatingRecord) -> Result<()> {
    check_value(record.rating)
}

/// Ratings must be finite and in (0, MAX_RATING]. Zero is reserved as the
/// "not rated" sentinel in the user-movie matrix.
fn check_value(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value > MAX_RATING {
        return Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
