//! Filter on the rating count a source attached to each candidate.
//!
//! The average source copies each movie's `rating_count` from the movie
//! stats table into the candidate, so this floor is checked against the same
//! table the scores came from. Candidates without a count are dropped.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

pub struct MinimumCountFilter {
    min_ratings: u32,
}

impl MinimumCountFilter {
    pub fn new(min_ratings: u32) -> Self {
        Self { min_ratings }
    }
}

impl Filter for MinimumCountFilter {
    fn name(&self) -> &str {
        "MinimumCountFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|c| c.metadata.rating_count.is_some_and(|n| n >= self.min_ratings))
            .collect())
    }
}
