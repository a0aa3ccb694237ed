//! Average Source - non-personalized candidates
//!
//! Every movie with statistics becomes a candidate scored by its mean
//! rating. The rating count travels with the candidate so the ranker can use
//! it as a tie-break and the popularity filter can check it.

use crate::types::{Candidate, CandidateSource};
use data_loader::MovieStatsTable;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AverageSource {
    stats: Arc<MovieStatsTable>,
}

impl AverageSource {
    pub fn new(stats: Arc<MovieStatsTable>) -> Self {
        Self { stats }
    }

    /// One candidate per movie, score = mean rating
    #[instrument(skip(self))]
    pub fn get_candidates(&self) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = self
            .stats
            .iter()
            .map(|stats| {
                Candidate::new(stats.movie_id, CandidateSource::Average, stats.avg_rating)
                    .with_rating_count(stats.rating_count)
            })
            .collect();

        debug!("Generated {} average candidates", candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Rating, RatingDataset};

    #[test]
    fn test_get_candidates() {
        let dataset = RatingDataset::from_ratings(vec![
            Rating::new(1, 1, 4.0, "A"),
            Rating::new(2, 1, 2.0, "A"),
            Rating::new(1, 2, 5.0, "B"),
        ]);
        let source = AverageSource::new(Arc::new(MovieStatsTable::compute(&dataset)));

        let mut candidates = source.get_candidates();
        candidates.sort_by_key(|c| c.movie_id);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].score, 3.0);
        assert_eq!(candidates[0].metadata.rating_count, Some(2));
        assert_eq!(candidates[1].score, 5.0);
        assert!(candidates.iter().all(|c| c.source == CandidateSource::Average));
    }
}
