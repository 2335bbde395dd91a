//! Explicit cache for the loaded city table and its feature matrix
//!
//! The matrix is built on first use and reused until the records are replaced
//! or the cache is invalidated. Handles are cheap to clone and share the same
//! state.

use crate::embedder::build_city_matrix;
use citymatch_core::{CityMatrix, CityRecord};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
struct CacheState {
    records: Arc<Vec<CityRecord>>,
    matrix: Option<Arc<CityMatrix>>,
}

#[derive(Clone, Default)]
pub struct CityCache {
    state: Arc<RwLock<CacheState>>,
}

impl CityCache {
    pub fn new(records: Vec<CityRecord>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState {
                records: Arc::new(records),
                matrix: None,
            })),
        }
    }

    pub fn records(&self) -> Arc<Vec<CityRecord>> {
        self.state.read().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Whether the normalized matrix is currently cached
    pub fn is_built(&self) -> bool {
        self.state.read().matrix.is_some()
    }

    /// Normalized city matrix, built from the current records on first use
    pub fn matrix(&self) -> Arc<CityMatrix> {
        if let Some(matrix) = &self.state.read().matrix {
            return matrix.clone();
        }

        let mut state = self.state.write();
        // another handle may have built it while we waited for the lock
        if let Some(matrix) = &state.matrix {
            return matrix.clone();
        }

        let matrix = Arc::new(build_city_matrix(&state.records));
        debug!(rows = matrix.len(), "City matrix cached");
        state.matrix = Some(matrix.clone());
        matrix
    }

    /// Swap in a new record set and drop the cached matrix
    pub fn replace(&self, records: Vec<CityRecord>) {
        let mut state = self.state.write();
        state.records = Arc::new(records);
        state.matrix = None;
        debug!(records = state.records.len(), "City cache replaced");
    }

    /// Drop the cached matrix; the next `matrix()` call rebuilds it
    pub fn invalidate(&self) {
        self.state.write().matrix = None;
    }
}
