//! Shared handler state.

use std::sync::Arc;

use tickview_core::{CriteriaSet, FilterEngine, GlobalRanges, Normalized, RawParams, SeriesStore};

/// Cheap-to-clone handle on the read-only store.
#[derive(Debug, Clone)]
pub struct AppState {
    engine: FilterEngine,
}

impl AppState {
    pub fn new(store: Arc<SeriesStore>) -> Self {
        Self {
            engine: FilterEngine::new(store),
        }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn store(&self) -> &SeriesStore {
        self.engine.store()
    }

    pub fn normalize(&self, raw: &RawParams) -> Normalized {
        CriteriaSet::normalize(raw, self.store())
    }

    /// Recomputed per call; the store is static so the result never changes.
    pub fn ranges(&self) -> GlobalRanges {
        GlobalRanges::compute(self.store())
    }
}
