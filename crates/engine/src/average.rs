//! Average recommender: best mean rating among popular, unseen movies.
//!
//! ## Pipeline
//! 1. Watched set from the raw dataset (unknown user = nothing watched)
//! 2. Every movie with stats as a candidate, score = mean rating
//! 3. Drop movies with fewer than `min_ratings` ratings
//! 4. Drop watched movies
//! 5. Sort by mean desc, then rating count desc; keep `top_n`
//! 6. Attach titles

use crate::config::{RecommendConfig, Strategy};
use crate::recommendation::RecommendationList;
use anyhow::{Context, Result};
use data_loader::{MovieStatsTable, RatingDataset, UserId};
use pipeline::filters::{AlreadyWatchedFilter, MinimumCountFilter};
use pipeline::{FilterPipeline, Ranker};
use sources::AverageSource;
use sources::user_context::build_user_context;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AverageRecommender {
    dataset: Arc<RatingDataset>,
    source: AverageSource,
}

impl AverageRecommender {
    pub fn new(dataset: Arc<RatingDataset>, stats: Arc<MovieStatsTable>) -> Self {
        Self {
            dataset,
            source: AverageSource::new(stats),
        }
    }

    #[instrument(skip(self, config))]
    pub fn recommend(&self, user_id: UserId, config: &RecommendConfig) -> Result<RecommendationList> {
        let context = build_user_context(&self.dataset, user_id);
        debug!("User {} has watched {} movies", user_id, context.watched_movies.len());

        let candidates = self.source.get_candidates();

        let pipeline = FilterPipeline::new()
            .add_filter(MinimumCountFilter::new(config.min_ratings))
            .add_filter(AlreadyWatchedFilter);
        let filtered = pipeline
            .apply(candidates, &context)
            .context("Failed to apply average filters")?;

        let ranked = Ranker::new(config.top_n)
            .with_count_tiebreak()
            .rank(filtered);

        Ok(RecommendationList::from_candidates(
            Strategy::Average,
            &self.dataset,
            ranked,
        ))
    }
}
