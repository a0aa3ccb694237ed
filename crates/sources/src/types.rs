//! Candidate and per-request context types shared by the sources and the
//! filter pipeline.

use data_loader::{MovieId, UserId};
use std::collections::HashSet;

/// Which source produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Mean rating across all users
    Average,
    /// Similarity-weighted neighbor prediction
    Collaborative,
}

/// Extra evidence attached to a candidate, used for tie-breaks and display
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CandidateMetadata {
    /// Number of ratings the movie has across the dataset
    pub rating_count: Option<u32>,
    /// Number of neighbors who rated the movie
    pub neighbor_count: Option<usize>,
}

/// A movie proposed for recommendation together with its score
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie_id: MovieId,
    pub source: CandidateSource,
    pub score: f64,
    pub metadata: CandidateMetadata,
}

impl Candidate {
    pub fn new(movie_id: MovieId, source: CandidateSource, score: f64) -> Self {
        Self {
            movie_id,
            source,
            score,
            metadata: CandidateMetadata::default(),
        }
    }

    pub fn with_rating_count(mut self, count: u32) -> Self {
        self.metadata.rating_count = Some(count);
        self
    }
}

/// What we know about the requesting user for one request
#[derive(Debug, Clone, PartialEq)]
pub struct UserContext {
    pub user_id: UserId,
    /// Movies the user has already rated
    pub watched_movies: HashSet<MovieId>,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            watched_movies: HashSet::new(),
        }
    }
}
