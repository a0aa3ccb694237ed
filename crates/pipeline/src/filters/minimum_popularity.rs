//! Filter to enforce the popularity floor.
//!
//! A movie is eligible only when it has at least `min_ratings` ratings
//! across the whole dataset. This keeps a single 5.0 rating from producing
//! a top recommendation.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MoviePopularity;
use sources::{Candidate, UserContext};
use std::sync::Arc;

/// Removes candidates with fewer than `min_ratings` ratings.
pub struct MinimumPopularityFilter {
    popularity: Arc<MoviePopularity>,
    min_ratings: u32,
}

impl MinimumPopularityFilter {
    /// # Arguments
    /// * `popularity` - Shared rating counts per movie
    /// * `min_ratings` - Minimum number of ratings (default 50 upstream)
    pub fn new(popularity: Arc<MoviePopularity>, min_ratings: u32) -> Self {
        Self {
            popularity,
            min_ratings,
        }
    }
}

impl Filter for MinimumPopularityFilter {
    fn name(&self) -> &str {
        "MinimumPopularityFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| self.popularity.meets(candidate.movie_id, self.min_ratings))
            .collect())
    }
}
