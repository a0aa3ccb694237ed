//! Filter implementations for the candidate pipeline.

pub mod already_watched;
pub mod minimum_count;
pub mod minimum_popularity;

// Re-export for convenience
pub use already_watched::AlreadyWatchedFilter;
pub use minimum_count::MinimumCountFilter;
pub use minimum_popularity::MinimumPopularityFilter;
