//! Shared, reloadable engine for long-lived callers.
//!
//! Requests take a snapshot (`Arc` clone) under a short read lock and run
//! without holding it. A reload builds the new engine first and only takes
//! the write lock to swap the pointer, so in-flight requests finish against
//! the engine they started with.

use crate::config::RecommendRequest;
use crate::engine::RecommendationEngine;
use crate::recommendation::RecommendationList;
use anyhow::{Context, Result};
use data_loader::RatingDataset;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

pub struct EngineHandle {
    current: RwLock<Arc<RecommendationEngine>>,
}

impl EngineHandle {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// The engine currently serving requests
    pub fn snapshot(&self) -> Arc<RecommendationEngine> {
        // The guarded value is a single Arc; a panicked writer cannot leave it half-written
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuild from a new dataset and swap it in.
    ///
    /// A dataset that fails validation leaves the current engine serving.
    pub fn reload(&self, dataset: RatingDataset) -> Result<()> {
        let engine = Arc::new(RecommendationEngine::load(dataset)?);
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = engine;
        info!("Swapped in reloaded engine");
        Ok(())
    }

    /// Rebuild from the CSV files in `data_dir` and swap it in
    pub fn reload_from_files(&self, data_dir: &Path) -> Result<()> {
        let dataset = RatingDataset::load_from_files(data_dir)
            .with_context(|| format!("Failed to reload dataset from {}", data_dir.display()))?;
        self.reload(dataset)
    }

    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendationList> {
        self.snapshot().recommend(request)
    }
}
