//! Output types handed to presentation shells.

use crate::config::Strategy;
use data_loader::{MovieId, RatingDataset};
use serde::Serialize;
use sources::Candidate;

/// What a recommendation's score means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Mean rating across all users
    Rating,
    /// Personalized predicted score
    Score,
}

impl ScoreKind {
    /// Column label for display
    pub fn label(&self) -> &'static str {
        match self {
            ScoreKind::Rating => "rating",
            ScoreKind::Score => "score",
        }
    }
}

impl From<Strategy> for ScoreKind {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Average => ScoreKind::Rating,
            Strategy::Collaborative => ScoreKind::Score,
        }
    }
}

/// One recommended movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
}

/// Ranked recommendations, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationList {
    pub strategy: Strategy,
    pub score_kind: ScoreKind,
    pub items: Vec<Recommendation>,
}

impl RecommendationList {
    pub fn empty(strategy: Strategy) -> Self {
        Self {
            strategy,
            score_kind: strategy.into(),
            items: Vec::new(),
        }
    }

    /// Join titles onto ranked candidates, keeping their order
    pub fn from_candidates(
        strategy: Strategy,
        dataset: &RatingDataset,
        candidates: Vec<Candidate>,
    ) -> Self {
        let items = candidates
            .into_iter()
            .filter_map(|candidate| {
                let title = dataset.title(candidate.movie_id)?;
                Some(Recommendation {
                    movie_id: candidate.movie_id,
                    title: title.to_string(),
                    score: candidate.score,
                })
            })
            .collect();

        Self {
            strategy,
            score_kind: strategy.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// (title, score) pairs in rank order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.items.iter().map(|r| (r.title.as_str(), r.score))
    }
}
