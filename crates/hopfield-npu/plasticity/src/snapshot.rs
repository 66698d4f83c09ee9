// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serializable snapshot of a trained weight store
//!
//! Weights are stored row-major as a flat list. Loading a snapshot checks
//! every store invariant before a `WeightStore` is rebuilt from it.

use hopfield_npu_neural::{HopfieldError, Result, ThresholdMode};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::hebbian::WeightStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    pub size: usize,
    /// Row-major K×K weights
    pub weights: Vec<i32>,
    pub threshold_mode: ThresholdMode,
    pub thresholds: Vec<i32>,
    pub pattern_count: usize,
}

impl WeightSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HopfieldError::Snapshot(format!("serialize failed: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| HopfieldError::Snapshot(format!("parse failed: {}", e)))
    }

    /// Rebuild a weight store, rejecting snapshots that break its invariants
    pub fn into_store(self) -> Result<WeightStore> {
        let size = self.size;
        if size == 0 {
            return Err(HopfieldError::Snapshot("size must be positive".to_string()));
        }
        if self.weights.len() != size * size {
            return Err(HopfieldError::Snapshot(format!(
                "expected {} weights for {} neurons, found {}",
                size * size,
                size,
                self.weights.len()
            )));
        }
        let expected_thresholds = self
            .threshold_mode
            .thresholds(size)
            .map_err(|e| HopfieldError::Snapshot(format!("threshold mode: {}", e)))?;
        if expected_thresholds != self.thresholds {
            return Err(HopfieldError::Snapshot(format!(
                "thresholds do not match mode '{}'",
                self.threshold_mode.name()
            )));
        }

        let weights = Array2::from_shape_vec((size, size), self.weights)
            .map_err(|e| HopfieldError::Snapshot(e.to_string()))?;
        if weights != weights.t() {
            return Err(HopfieldError::Snapshot("weights are not symmetric".to_string()));
        }
        if let Some(k) = weights.diag().iter().position(|&w| w != 0) {
            return Err(HopfieldError::Snapshot(format!(
                "self-connection on neuron {}",
                k
            )));
        }

        Ok(WeightStore::from_parts(
            weights,
            self.threshold_mode,
            self.thresholds,
            self.pattern_count,
        ))
    }
}

impl WeightStore {
    pub fn snapshot(&self) -> WeightSnapshot {
        WeightSnapshot {
            size: self.size(),
            weights: self.weights().iter().copied().collect(),
            threshold_mode: self.threshold_mode().clone(),
            thresholds: self.thresholds().to_vec(),
            pattern_count: self.pattern_count(),
        }
    }

    pub fn from_snapshot(snapshot: WeightSnapshot) -> Result<Self> {
        snapshot.into_store()
    }
}
