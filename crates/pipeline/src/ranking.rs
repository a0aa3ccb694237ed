//! Final ordering of filtered candidates.
//!
//! Candidates are sorted by score descending. Optionally the rating count
//! breaks ties (more evidence first). Any remaining tie goes to the lower
//! movie id so the same input always yields the same order.

use sources::Candidate;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    limit: usize,
    count_tiebreak: bool,
}

impl Ranker {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            count_tiebreak: false,
        }
    }

    /// Break score ties by `metadata.rating_count`, higher first
    pub fn with_count_tiebreak(mut self) -> Self {
        self.count_tiebreak = true;
        self
    }

    /// Sort and keep the first `limit` candidates
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| self.compare(a, b));
        candidates.truncate(self.limit);
        candidates
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        let by_score = b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
        let by_count = if self.count_tiebreak {
            b.metadata.rating_count.cmp(&a.metadata.rating_count)
        } else {
            Ordering::Equal
        };
        by_score
            .then(by_count)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    fn average(movie_id: u32, score: f64, count: u32) -> Candidate {
        Candidate::new(movie_id, CandidateSource::Average, score).with_rating_count(count)
    }

    #[test]
    fn test_rank_by_score_and_truncate() {
        let ranked = Ranker::new(2).rank(vec![
            average(1, 3.0, 10),
            average(2, 4.5, 10),
            average(3, 4.0, 10),
        ]);

        let ids: Vec<u32> = ranked.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_count_tiebreak() {
        let candidates = vec![average(1, 4.0, 60), average(2, 4.0, 90), average(3, 4.2, 55)];

        let ranked = Ranker::new(10).with_count_tiebreak().rank(candidates.clone());
        let ids: Vec<u32> = ranked.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // Without the count tiebreak the lower movie id wins
        let ranked = Ranker::new(10).rank(candidates);
        let ids: Vec<u32> = ranked.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_zero_limit() {
        assert!(Ranker::new(0).rank(vec![average(1, 4.0, 1)]).is_empty());
    }
}
