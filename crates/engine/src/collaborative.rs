//! Collaborative recommender: personalized predictions from similar users.
//!
//! ## Pipeline
//! 1. Watched set from the user's matrix row (no row = empty result)
//! 2. Predicted score for every movie a neighbor rated
//! 3. Drop watched movies
//! 4. Drop movies with fewer than `min_ratings` ratings overall
//! 5. Sort by predicted score desc; keep `top_n`
//! 6. Attach titles

use crate::config::{RecommendConfig, Strategy};
use crate::recommendation::RecommendationList;
use anyhow::{Context, Result};
use data_loader::{MoviePopularity, RatingDataset, UserId};
use pipeline::filters::{AlreadyWatchedFilter, MinimumPopularityFilter};
use pipeline::{FilterPipeline, Ranker};
use sources::CollaborativeSource;
use sources::user_context::build_matrix_context;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct CollaborativeRecommender {
    dataset: Arc<RatingDataset>,
    popularity: Arc<MoviePopularity>,
    source: CollaborativeSource,
}

impl CollaborativeRecommender {
    pub fn new(
        dataset: Arc<RatingDataset>,
        popularity: Arc<MoviePopularity>,
        source: CollaborativeSource,
    ) -> Self {
        Self {
            dataset,
            popularity,
            source,
        }
    }

    #[instrument(skip(self, config))]
    pub fn recommend(&self, user_id: UserId, config: &RecommendConfig) -> Result<RecommendationList> {
        let start_time = Instant::now();

        let Some(context) = build_matrix_context(self.source.matrix(), user_id) else {
            info!("User {} has no ratings, nothing to recommend", user_id);
            return Ok(RecommendationList::empty(Strategy::Collaborative));
        };

        let candidates = self.source.get_candidates(&context);
        info!("Generated {} collaborative candidates", candidates.len());

        let pipeline = FilterPipeline::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(MinimumPopularityFilter::new(
                self.popularity.clone(),
                config.min_ratings,
            ));
        let filtered = pipeline
            .apply(candidates, &context)
            .context("Failed to apply collaborative filters")?;
        info!("Applied filters, candidates remaining: {}", filtered.len());

        let ranked = Ranker::new(config.top_n).rank(filtered);
        let list = RecommendationList::from_candidates(Strategy::Collaborative, &self.dataset, ranked);

        info!(
            "Returning {} recommendations in {:?}",
            list.len(),
            start_time.elapsed()
        );
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::ScoreKind;
    use data_loader::{MovieStatsTable, Rating, UserMovieMatrix};

    fn create_recommender(ratings: Vec<Rating>) -> CollaborativeRecommender {
        let dataset = Arc::new(RatingDataset::from_ratings(ratings));
        let stats = Arc::new(MovieStatsTable::compute(&dataset));
        let popularity = Arc::new(MoviePopularity::compute(&dataset));
        let matrix = Arc::new(UserMovieMatrix::build(&dataset));
        let source = CollaborativeSource::new(dataset.clone(), matrix, stats);
        CollaborativeRecommender::new(dataset, popularity, source)
    }

    #[test]
    fn test_unknown_user_is_empty() {
        let recommender = create_recommender(vec![
            Rating::new(1, 1, 5.0, "A"),
            Rating::new(2, 1, 4.0, "A"),
        ]);
        let list = recommender
            .recommend(99, &RecommendConfig::default().with_min_ratings(1))
            .unwrap();

        assert!(list.is_empty());
        assert_eq!(list.score_kind, ScoreKind::Score);
    }

    #[test]
    fn test_recommends_unseen_neighbor_movie() {
        // User 2 agrees with user 1 on movies 1-3 and also rated movie 4
        let recommender = create_recommender(vec![
            Rating::new(1, 1, 5.0, "One"),
            Rating::new(1, 2, 4.0, "Two"),
            Rating::new(1, 3, 1.0, "Three"),
            Rating::new(2, 1, 5.0, "One"),
            Rating::new(2, 2, 4.0, "Two"),
            Rating::new(2, 3, 1.0, "Three"),
            Rating::new(2, 4, 4.0, "Four"),
        ]);
        let list = recommender
            .recommend(1, &RecommendConfig::default().with_min_ratings(1))
            .unwrap();

        let titles: Vec<&str> = list.pairs().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["Four"]);
        assert!(list.items[0].score > 0.0 && list.items[0].score <= 5.0);
    }

    #[test]
    fn test_popularity_floor_applies() {
        let recommender = create_recommender(vec![
            Rating::new(1, 1, 5.0, "One"),
            Rating::new(1, 2, 4.0, "Two"),
            Rating::new(1, 3, 1.0, "Three"),
            Rating::new(2, 1, 5.0, "One"),
            Rating::new(2, 2, 4.0, "Two"),
            Rating::new(2, 3, 1.0, "Three"),
            Rating::new(2, 4, 4.0, "Four"),
        ]);
        let list = recommender
            .recommend(1, &RecommendConfig::default().with_min_ratings(2))
            .unwrap();

        assert!(list.is_empty());
    }
}
