//! Recommendation engine for the movie recommender.
//!
//! This crate wires the data loader, candidate sources and filter pipeline
//! into the two recommendation strategies and exposes them behind one entry
//! point, `RecommendationEngine::recommend`.

pub mod average;
pub mod collaborative;
pub mod config;
pub mod engine;
pub mod handle;
pub mod recommendation;

pub use config::{
    DEFAULT_MIN_RATINGS, DEFAULT_TOP_N, ParseStrategyError, RecommendConfig, RecommendRequest,
    Strategy,
};
pub use engine::RecommendationEngine;
pub use handle::EngineHandle;
pub use recommendation::{Recommendation, RecommendationList, ScoreKind};
