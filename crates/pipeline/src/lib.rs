//! Pipeline for filtering and ranking movie candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Ranker for the final sort and truncation
//!
//! ## Architecture
//! 1. A source (average or collaborative) proposes scored candidates
//! 2. Filters remove watched and under-rated movies
//! 3. The ranker orders the survivors and keeps the top N
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, Ranker};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(MinimumPopularityFilter::new(popularity.clone(), 50))
//!     .add_filter(AlreadyWatchedFilter);
//!
//! let filtered = pipeline.apply(candidates, &context)?;
//! let top = Ranker::new(10).with_count_tiebreak().rank(filtered);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranking::Ranker;
