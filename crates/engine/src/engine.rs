//! # Recommendation Engine
//!
//! Owns every artifact derived from one loaded dataset and dispatches
//! requests to the recommender for the requested strategy:
//! 1. Compute per-movie stats and popularity counts
//! 2. Build the dense user x movie matrix
//! 3. Wire both recommenders over the shared artifacts
//!
//! Everything is immutable after `load` and shared through `Arc`, so a
//! cloned engine can serve concurrent requests without locking.

use crate::average::AverageRecommender;
use crate::collaborative::CollaborativeRecommender;
use crate::config::{RecommendRequest, Strategy};
use crate::recommendation::RecommendationList;
use anyhow::{Context, Result};
use data_loader::{MoviePopularity, MovieStatsTable, RatingDataset, UserMovieMatrix};
use sources::CollaborativeSource;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Clone)]
pub struct RecommendationEngine {
    dataset: Arc<RatingDataset>,
    stats: Arc<MovieStatsTable>,
    popularity: Arc<MoviePopularity>,
    matrix: Arc<UserMovieMatrix>,
    average: AverageRecommender,
    collaborative: CollaborativeRecommender,
}

impl RecommendationEngine {
    /// Validate a joined dataset and derive every artifact from it
    pub fn load(dataset: RatingDataset) -> Result<Self> {
        dataset.validate().context("Refusing to build engine")?;

        let start_time = Instant::now();
        let dataset = Arc::new(dataset);

        let stats = Arc::new(MovieStatsTable::compute(&dataset));
        let popularity = Arc::new(MoviePopularity::compute(&dataset));
        info!(
            "Computed stats for {} movies in {:?}",
            stats.len(),
            start_time.elapsed()
        );

        let matrix_start = Instant::now();
        let matrix = Arc::new(UserMovieMatrix::build(&dataset));
        let (users, movies) = matrix.shape();
        info!(
            "Built {}x{} rating matrix in {:?}",
            users,
            movies,
            matrix_start.elapsed()
        );

        let average = AverageRecommender::new(dataset.clone(), stats.clone());
        let source = CollaborativeSource::new(dataset.clone(), matrix.clone(), stats.clone());
        let collaborative = CollaborativeRecommender::new(dataset.clone(), popularity.clone(), source);

        info!("Engine ready in {:?}", start_time.elapsed());
        Ok(Self {
            dataset,
            stats,
            popularity,
            matrix,
            average,
            collaborative,
        })
    }

    /// Load `ratings.csv` and `movies.csv` from a directory and build an engine
    pub fn from_files(data_dir: &Path) -> Result<Self> {
        let dataset = RatingDataset::load_from_files(data_dir)
            .with_context(|| format!("Failed to load dataset from {}", data_dir.display()))?;
        Self::load(dataset)
    }

    /// Main entry point: ranked recommendations for one request
    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendationList> {
        match request.strategy {
            Strategy::Average => self.average.recommend(request.user_id, &request.config),
            Strategy::Collaborative => self
                .collaborative
                .recommend(request.user_id, &request.config),
        }
    }

    pub fn dataset(&self) -> &RatingDataset {
        &self.dataset
    }

    pub fn stats(&self) -> &MovieStatsTable {
        &self.stats
    }

    pub fn popularity(&self) -> &MoviePopularity {
        &self.popularity
    }

    pub fn matrix(&self) -> &UserMovieMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecommendConfig;
    use data_loader::Rating;

    fn build_test_engine() -> RecommendationEngine {
        RecommendationEngine::load(RatingDataset::from_ratings(vec![
            Rating::new(1, 1, 4.0, "A"),
            Rating::new(2, 1, 5.0, "A"),
            Rating::new(2, 2, 3.0, "B"),
            Rating::new(3, 3, 5.0, "C"),
        ]))
        .unwrap()
    }

    #[test]
    fn test_load_builds_artifacts() {
        let engine = build_test_engine();
        assert_eq!(engine.stats().len(), 3);
        assert_eq!(engine.popularity().count(1), 2);
        assert_eq!(engine.matrix().shape(), (3, 3));
        assert_eq!(engine.dataset().counts(), (3, 3, 4));
    }

    #[test]
    fn test_dispatch_by_strategy() {
        let engine = build_test_engine();
        let config = RecommendConfig::default().with_min_ratings(1);

        let average = engine
            .recommend(&RecommendRequest::new(1, Strategy::Average).with_config(config))
            .unwrap();
        assert_eq!(average.strategy, Strategy::Average);

        let collaborative = engine
            .recommend(&RecommendRequest::new(1, Strategy::Collaborative).with_config(config))
            .unwrap();
        assert_eq!(collaborative.strategy, Strategy::Collaborative);
    }

    #[test]
    fn test_load_rejects_zero_rating() {
        // A 0.0 would read as "unrated" in the matrix while the dataset counts it as watched
        let result = RecommendationEngine::load(RatingDataset::from_ratings(vec![
            Rating::new(1, 1, 4.0, "A"),
            Rating::new(1, 3, 0.0, "C"),
            Rating::new(2, 1, 5.0, "A"),
            Rating::new(2, 3, 2.0, "C"),
        ]));

        let err = result.err().unwrap();
        assert!(
            err.chain()
                .any(|cause| cause.to_string().contains("movie 3"))
        );
    }

    #[test]
    fn test_from_files_missing_dir() {
        let result = RecommendationEngine::from_files(Path::new("/nonexistent/movie-data"));
        assert!(result.is_err());
    }
}
