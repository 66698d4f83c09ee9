// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Lock-guarded weight store shared between recall workers
//!
//! Recall holds a read guard for the whole run, so retraining (write guard)
//! can never be observed half-applied.

use std::sync::Arc;

use hopfield_npu_neural::{Pattern, Result, ThresholdMode};
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::debug;

use crate::hebbian::WeightStore;
use crate::snapshot::WeightSnapshot;

/// Cheap-to-clone handle to a weight store
#[derive(Debug, Clone)]
pub struct SharedWeightStore {
    inner: Arc<RwLock<WeightStore>>,
}

impl SharedWeightStore {
    pub fn new(store: WeightStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Untrained shared store for `size` neurons
    pub fn with_size(size: usize) -> Result<Self> {
        Ok(Self::new(WeightStore::new(size)?))
    }

    /// Acquire a read guard; hold it for the duration of a recall
    pub fn read(&self) -> RwLockReadGuard<'_, WeightStore> {
        self.inner.read()
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    /// Retrain under the write lock
    ///
    /// Readers see either the old weights or the new ones, never a mix.
    pub fn retrain(&self, patterns: &[Pattern]) -> Result<()> {
        let mut store = self.inner.write();
        store.train(patterns)?;
        debug!("[SHARED-STORE] Retrained with {} pattern(s)", patterns.len());
        Ok(())
    }

    pub fn set_thresholds(&self, mode: ThresholdMode) -> Result<()> {
        self.inner.write().set_thresholds(mode)
    }

    pub fn snapshot(&self) -> WeightSnapshot {
        self.inner.read().snapshot()
    }
}

impl From<WeightStore> for SharedWeightStore {
    fn from(store: WeightStore) -> Self {
        Self::new(store)
    }
}
