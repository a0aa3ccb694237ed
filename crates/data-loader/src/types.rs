//! Core domain types for rating data.
//!
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Raw CSV records (`RatingRecord`, `Movie`) as they come off disk
//! - The joined `Rating` observation every other component consumes
//! - `RatingDataset`, the immutable in-memory collection of ratings

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Highest value a rating can take
pub const MAX_RATING: f64 = 5.0;

// =============================================================================
// Raw Records
// =============================================================================

/// One row of `ratings.csv`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub rating: f64,
    /// Not used by the recommenders, kept when present
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// One row of `movies.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: MovieId,
    pub title: String,
    /// Pipe-separated genre list, e.g. "Adventure|Animation|Children"
    #[serde(default)]
    pub genres: String,
}

// =============================================================================
// Joined Rating
// =============================================================================

/// A single rating observation joined with the title of the rated movie.
///
/// The title is shared between all ratings of the same movie, so cloning a
/// `Rating` never copies the string.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Strictly positive, at most `MAX_RATING`
    pub rating: f64,
    pub title: Arc<str>,
}

impl Rating {
    pub fn new(
        user_id: UserId,
        movie_id: MovieId,
        rating: f64,
        title: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            title: title.into(),
        }
    }
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Mean rating and rating count of one movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub movie_id: MovieId,
    pub avg_rating: f64,
    pub rating_count: u32,
}

// =============================================================================
// RatingDataset
// =============================================================================

/// The flat collection of joined ratings plus lookup indices.
///
/// Built once and never mutated. All derived artifacts (movie stats,
/// popularity, user-movie matrix) are computed from a `&RatingDataset`.
#[derive(Debug, Default)]
pub struct RatingDataset {
    pub(crate) ratings: Vec<Rating>,
    /// All ratings made by each user, in dataset order
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
    /// One title per movie (first seen wins)
    pub(crate) titles: HashMap<MovieId, Arc<str>>,
}

impl RatingDataset {
    /// Build a dataset from already-joined ratings.
    ///
    /// No validation happens here; `load_from_files` and `join` validate
    /// before calling this.
    pub fn from_ratings(ratings: Vec<Rating>) -> Self {
        let mut user_ratings: HashMap<UserId, Vec<Rating>> = HashMap::new();
        let mut titles: HashMap<MovieId, Arc<str>> = HashMap::new();

        for rating in &ratings {
            user_ratings
                .entry(rating.user_id)
                .or_default()
                .push(rating.clone());
            titles
                .entry(rating.movie_id)
                .or_insert_with(|| Arc::clone(&rating.title));
        }

        Self {
            ratings,
            user_ratings,
            titles,
        }
    }

    /// Every rating in load order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// All ratings made by a user, empty if the user never rated anything
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_ratings.contains_key(&user_id)
    }

    /// Movies the user has rated. Unknown users have watched nothing.
    pub fn watched_movies(&self, user_id: UserId) -> HashSet<MovieId> {
        self.get_user_ratings(user_id)
            .iter()
            .map(|r| r.movie_id)
            .collect()
    }

    pub fn title(&self, movie_id: MovieId) -> Option<&str> {
        self.titles.get(&movie_id).map(|t| t.as_ref())
    }

    /// Iterate over every (movie id, title) pair present in the dataset
    pub fn titles(&self) -> impl Iterator<Item = (MovieId, &str)> {
        self.titles.iter().map(|(&id, title)| (id, title.as_ref()))
    }

    /// Mean of the user's own ratings
    pub fn user_avg_rating(&self, user_id: UserId) -> Option<f64> {
        mean(self.get_user_ratings(user_id).iter().map(|r| r.rating))
    }

    /// Mean over every rating in the dataset
    pub fn global_avg_rating(&self) -> Option<f64> {
        mean(self.ratings.iter().map(|r| r.rating))
    }

    /// Distinct user ids in ascending order
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.user_ratings.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.user_ratings.len(), self.titles.len(), self.ratings.len())
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Arithmetic mean, `None` for an empty input
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
