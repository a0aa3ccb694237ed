//! Request options recognized by the engine.

use data_loader::UserId;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default maximum number of recommendations
pub const DEFAULT_TOP_N: usize = 10;

/// Default popularity floor
pub const DEFAULT_MIN_RATINGS: u32 = 50;

/// Which recommender runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest mean rating among sufficiently rated, unseen movies
    #[default]
    Average,
    /// Similarity-weighted neighbor prediction
    Collaborative,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Average => "average",
            Strategy::Collaborative => "collaborative",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy '{0}', expected 'average' or 'collaborative'")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" => Ok(Strategy::Average),
            "collaborative" => Ok(Strategy::Collaborative),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Tuning shared by both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendConfig {
    /// Maximum number of recommendations returned
    pub top_n: usize,
    /// Minimum rating count a movie needs to be eligible
    pub min_ratings: u32,
}

impl RecommendConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_min_ratings(mut self, min_ratings: u32) -> Self {
        self.min_ratings = min_ratings;
        self
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_ratings: DEFAULT_MIN_RATINGS,
        }
    }
}

/// One recommendation query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendRequest {
    pub user_id: UserId,
    pub strategy: Strategy,
    pub config: RecommendConfig,
}

impl RecommendRequest {
    pub fn new(user_id: UserId, strategy: Strategy) -> Self {
        Self {
            user_id,
            strategy,
            config: RecommendConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RecommendConfig) -> Self {
        self.config = config;
        self
    }
}
