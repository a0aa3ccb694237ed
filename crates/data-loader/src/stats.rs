//! Per-movie aggregates derived from a `RatingDataset`.
//!
//! - `MovieStatsTable`: mean rating and rating count per movie
//! - `MoviePopularity`: rating count per movie, used as an eligibility floor
//!
//! Both are pure functions of the dataset and are rebuilt wholesale, never
//! patched.

use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;

/// Mean rating and count for every movie present in a dataset
#[derive(Debug, Clone, Default)]
pub struct MovieStatsTable {
    stats: HashMap<MovieId, MovieStats>,
}

impl MovieStatsTable {
    /// Group ratings by movie and compute mean and count.
    ///
    /// Grouping is sequential so each movie's sum runs in dataset order;
    /// only the per-movie reduction is parallel.
    pub fn compute(dataset: &RatingDataset) -> Self {
        let mut movie_ratings: HashMap<MovieId, Vec<f64>> = HashMap::new();
        for rating in dataset.ratings() {
            movie_ratings
                .entry(rating.movie_id)
                .or_default()
                .push(rating.rating);
        }

        let stats = movie_ratings
            .par_iter()
            .map(|(&movie_id, ratings)| {
                let rating_count = ratings.len() as u32;
                let total: f64 = ratings.iter().sum();
                (
                    movie_id,
                    MovieStats {
                        movie_id,
                        avg_rating: total / rating_count as f64,
                        rating_count,
                    },
                )
            })
            .collect();

        Self { stats }
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&MovieStats> {
        self.stats.get(&movie_id)
    }

    pub fn avg_rating(&self, movie_id: MovieId) -> Option<f64> {
        self.stats.get(&movie_id).map(|s| s.avg_rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieStats> {
        self.stats.values()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Number of ratings per movie
#[derive(Debug, Clone, Default)]
pub struct MoviePopularity {
    counts: HashMap<MovieId, u32>,
}

impl MoviePopularity {
    pub fn compute(dataset: &RatingDataset) -> Self {
        let mut counts: HashMap<MovieId, u32> = HashMap::new();
        for rating in dataset.ratings() {
            *counts.entry(rating.movie_id).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Rating count, 0 for a movie nobody rated
    pub fn count(&self, movie_id: MovieId) -> u32 {
        self.counts.get(&movie_id).copied().unwrap_or(0)
    }

    pub fn meets(&self, movie_id: MovieId, min_ratings: u32) -> bool {
        self.count(movie_id) >= min_ratings
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> RatingDataset {
        RatingDataset::from_ratings(vec![
            Rating::new(1, 10, 4.0, "A"),
            Rating::new(2, 10, 2.0, "A"),
            Rating::new(3, 10, 3.0, "A"),
            Rating::new(1, 20, 5.0, "B"),
        ])
    }

    #[test]
    fn test_movie_stats() {
        let table = MovieStatsTable::compute(&dataset());

        assert_eq!(table.len(), 2);
        let a = table.get(10).unwrap();
        assert_eq!(a.rating_count, 3);
        assert!((a.avg_rating - 3.0).abs() < 1e-12);
        assert_eq!(table.avg_rating(20), Some(5.0));
        assert!(table.get(30).is_none());
    }

    #[test]
    fn test_movie_popularity() {
        let popularity = MoviePopularity::compute(&dataset());

        assert_eq!(popularity.count(10), 3);
        assert_eq!(popularity.count(20), 1);
        assert_eq!(popularity.count(30), 0);
        assert!(popularity.meets(10, 3));
        assert!(!popularity.meets(20, 2));
    }

    #[test]
    fn test_empty_dataset() {
        let empty = RatingDataset::default();
        assert!(MovieStatsTable::compute(&empty).is_empty());
        assert!(MoviePopularity::compute(&empty).is_empty());
    }
}
