//! Core traits for the filtering pipeline.

use anyhow::Result;
use sources::{Candidate, UserContext};

/// A composable step that removes candidates.
///
/// Filters take ownership of the candidate list and hand back the survivors
/// in their original order. `Send + Sync` lets one pipeline serve concurrent
/// requests.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - The requesting user's watch history
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>>;
}
