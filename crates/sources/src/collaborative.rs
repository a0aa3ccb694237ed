//! Collaborative Source - user-based collaborative filtering
//!
//! Predicts a personalized score for every movie the target's neighborhood
//! has rated.
//!
//! ## Algorithm
//! 1. Build the neighborhood (see `similarity`): positive Pearson
//!    correlations, rescaled to [0.5, 1.0], top 20.
//! 2. For each movie column, in parallel:
//!    - gather neighbor ratings, skipping unrated cells
//!    - skip the movie if no neighbor rated it
//!    - weighted = sum(rating * weight) / sum(weight)
//!    - base = (user mean + movie mean + global mean) / 3
//!    - score = min((weighted + base) / 2 * 1.05, 5.0)
//! 3. Return the predictions in column order.
//!
//! Watched movies and the popularity floor are handled by the filter
//! pipeline, not here.

use crate::similarity::{self, Neighbor};
use crate::types::{Candidate, CandidateSource, UserContext};
use data_loader::{MAX_RATING, MovieStatsTable, RatingDataset, UNRATED, UserId, UserMovieMatrix};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default neighborhood size
pub const DEFAULT_MAX_NEIGHBORS: usize = 20;

/// Default multiplicative boost applied to every blended prediction
pub const DEFAULT_SCORE_BOOST: f64 = 1.05;

/// Collaborative source generates personalized candidates from similar users
#[derive(Clone)]
pub struct CollaborativeSource {
    dataset: Arc<RatingDataset>,
    matrix: Arc<UserMovieMatrix>,
    stats: Arc<MovieStatsTable>,

    /// Mean over every rating in the dataset
    global_avg: f64,

    max_neighbors: usize,
    score_boost: f64,
    /// Upper cap for a final score
    max_rating: f64,
}

impl CollaborativeSource {
    pub fn new(
        dataset: Arc<RatingDataset>,
        matrix: Arc<UserMovieMatrix>,
        stats: Arc<MovieStatsTable>,
    ) -> Self {
        let global_avg = dataset.global_avg_rating().unwrap_or(0.0);
        Self {
            dataset,
            matrix,
            stats,
            global_avg,
            max_neighbors: DEFAULT_MAX_NEIGHBORS,
            score_boost: DEFAULT_SCORE_BOOST,
            max_rating: MAX_RATING,
        }
    }

    /// Configure the neighborhood size (default: 20)
    pub fn with_max_neighbors(mut self, max_neighbors: usize) -> Self {
        self.max_neighbors = max_neighbors;
        self
    }

    /// Configure the optimism boost (default: 1.05)
    pub fn with_score_boost(mut self, boost: f64) -> Self {
        self.score_boost = boost;
        self
    }

    /// Configure the score cap (default: 5.0)
    pub fn with_max_rating(mut self, max_rating: f64) -> Self {
        self.max_rating = max_rating;
        self
    }

    pub fn matrix(&self) -> &UserMovieMatrix {
        &self.matrix
    }

    pub fn global_avg(&self) -> f64 {
        self.global_avg
    }

    /// The active neighborhood of a user, strongest first
    pub fn neighborhood(&self, user_id: UserId) -> Vec<Neighbor> {
        similarity::neighborhood(&self.matrix, user_id, self.max_neighbors)
    }

    /// Predict a score for every movie at least one neighbor rated
    #[instrument(skip(self, user_context), fields(user_id = user_context.user_id))]
    pub fn get_candidates(&self, user_context: &UserContext) -> Vec<Candidate> {
        let user_id = user_context.user_id;
        if !self.matrix.contains_user(user_id) {
            debug!("User {} has no matrix row", user_id);
            return Vec::new();
        }
        let Some(user_avg) = self.dataset.user_avg_rating(user_id) else {
            return Vec::new();
        };

        let neighbors = self.neighborhood(user_id);
        debug!("Found {} neighbors", neighbors.len());
        if neighbors.is_empty() {
            return Vec::new();
        }

        let candidates: Vec<Candidate> = (0..self.matrix.movies().len())
            .into_par_iter()
            .filter_map(|col| self.predict_column(col, &neighbors, user_avg))
            .collect();

        debug!("Generated {} collaborative candidates", candidates.len());
        candidates
    }

    fn predict_column(&self, col: usize, neighbors: &[Neighbor], user_avg: f64) -> Option<Candidate> {
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut raters = 0usize;
        for neighbor in neighbors {
            let rating = self.matrix.value_at(neighbor.index, col);
            if rating > UNRATED {
                weighted_sum += rating * neighbor.weight;
                weight_sum += neighbor.weight;
                raters += 1;
            }
        }
        if raters == 0 {
            return None;
        }

        let movie_id = self.matrix.movies()[col];
        let movie_avg = self.stats.avg_rating(movie_id)?;
        let base = base_rating(user_avg, movie_avg, self.global_avg);
        let score = final_score(
            weighted_sum / weight_sum,
            base,
            self.score_boost,
            self.max_rating,
        );

        let mut candidate = Candidate::new(movie_id, CandidateSource::Collaborative, score);
        candidate.metadata.neighbor_count = Some(raters);
        Some(candidate)
    }
}

/// Bias estimate independent of the neighborhood
pub fn base_rating(user_avg: f64, movie_avg: f64, global_avg: f64) -> f64 {
    (user_avg + movie_avg + global_avg) / 3.0
}

/// Blend neighbor prediction with the base rating, boost, then cap
pub fn final_score(weighted: f64, base: f64, boost: f64, cap: f64) -> f64 {
    ((weighted + base) / 2.0 * boost).min(cap)
}
