//! # Sources Crate
//!
//! Candidate generation for movie recommendations.
//!
//! ## Components
//!
//! ### Average Source
//! Non-personalized: every movie scored by its mean rating, carrying its
//! rating count.
//!
//! ### Collaborative Source
//! User-based collaborative filtering:
//! - Pearson similarity between the target and every other user
//! - Positive correlations only, rescaled into [0.5, 1.0]
//! - Top 20 neighbors
//! - Per-movie weighted prediction blended with a bias estimate
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{AverageSource, CollaborativeSource, user_context::build_user_context};
//! use std::sync::Arc;
//!
//! let context = build_user_context(&dataset, user_id);
//!
//! let average = AverageSource::new(stats.clone());
//! let collaborative = CollaborativeSource::new(dataset.clone(), matrix.clone(), stats.clone());
//!
//! let popular = average.get_candidates();
//! let personal = collaborative.get_candidates(&context);
//! ```
//!
//! Sources do not filter. Already-watched movies and the popularity floor
//! are removed downstream by the `pipeline` crate.

// Public modules
pub mod types;
pub mod user_context;
pub mod similarity;
pub mod average;
pub mod collaborative;

// Re-export commonly used types
pub use types::{Candidate, CandidateMetadata, CandidateSource, UserContext};
pub use average::AverageSource;
pub use collaborative::CollaborativeSource;
pub use similarity::Neighbor;
