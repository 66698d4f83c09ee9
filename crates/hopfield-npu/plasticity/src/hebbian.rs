// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hebbian weight store
//!
//! ```text
//! W = Σ_μ p_μ · p_μᵗ      (outer product of every training pattern)
//! W[i][i] = 0
//! ```
//!
//! The matrix is rebuilt from scratch on every `train` call.

use hopfield_npu_neural::{
    dynamics, HopfieldError, Pattern, Result, ThresholdMode,
};
use ndarray::{Array2, ArrayView2};
use tracing::{debug, info, warn};

/// Fraction of K that can be stored before recall degrades (≈0.138·K)
const CAPACITY_RATIO: f64 = 0.138;

/// Symmetric zero-diagonal weights plus per-neuron thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct WeightStore {
    size: usize,
    weights: Array2<i32>,
    thresholds: Vec<i32>,
    threshold_mode: ThresholdMode,
    pattern_count: usize,
}

impl WeightStore {
    /// Create an untrained store for `size` neurons with zero thresholds
    ///
    /// # Errors
    /// `Config` if `size == 0`.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(HopfieldError::config("network size must be positive"));
        }
        Ok(Self {
            size,
            weights: Array2::zeros((size, size)),
            thresholds: vec![0; size],
            threshold_mode: ThresholdMode::Zero,
            pattern_count: 0,
        })
    }

    /// Assemble a store from parts that were already validated
    pub(crate) fn from_parts(
        weights: Array2<i32>,
        threshold_mode: ThresholdMode,
        thresholds: Vec<i32>,
        pattern_count: usize,
    ) -> Self {
        Self {
            size: weights.nrows(),
            weights,
            thresholds,
            threshold_mode,
            pattern_count,
        }
    }

    /// Number of neurons (K)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Read-only view of the K×K weight matrix
    pub fn weights(&self) -> ArrayView2<'_, i32> {
        self.weights.view()
    }

    /// Weight between neurons `i` and `j`
    pub fn weight(&self, i: usize, j: usize) -> Option<i32> {
        self.weights.get((i, j)).copied()
    }

    #[inline]
    pub fn thresholds(&self) -> &[i32] {
        &self.thresholds
    }

    pub fn threshold_mode(&self) -> &ThresholdMode {
        &self.threshold_mode
    }

    /// Number of patterns in the most recent training call
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Rough number of random patterns the network can hold (≈0.138·K)
    pub fn capacity_estimate(&self) -> usize {
        (self.size as f64 * CAPACITY_RATIO).floor() as usize
    }

    /// Encode `patterns` with the Hebbian rule, replacing any previous weights
    ///
    /// An empty slice resets the weights to zero.
    ///
    /// # Errors
    /// `Shape` if any pattern does not have `size()` neurons. Nothing is
    /// modified on error.
    pub fn train(&mut self, patterns: &[Pattern]) -> Result<()> {
        for pattern in patterns {
            pattern.ensure_size(self.size)?;
        }

        let weights = if patterns.is_empty() {
            Array2::zeros((self.size, self.size))
        } else {
            let flat: Vec<i32> = patterns
                .iter()
                .flat_map(|p| p.iter().map(i32::from))
                .collect();
            let stacked = Array2::from_shape_vec((patterns.len(), self.size), flat)
                .map_err(|e| HopfieldError::config(format!("pattern matrix: {}", e)))?;
            let mut weights = stacked.t().dot(&stacked);
            weights.diag_mut().fill(0);
            weights
        };

        self.weights = weights;
        self.pattern_count = patterns.len();

        info!(
            "[HEBBIAN] Trained {} pattern(s) into {}-neuron weight store",
            patterns.len(),
            self.size
        );
        if patterns.len() > self.capacity_estimate() {
            warn!(
                "[HEBBIAN] {} patterns exceed the estimated capacity of {} for K={}; expect spurious attractors",
                patterns.len(),
                self.capacity_estimate(),
                self.size
            );
        }
        Ok(())
    }

    /// Validate raw pattern values and train on them
    ///
    /// # Errors
    /// `Shape` or `Alphabet` from the first invalid pattern. Nothing is
    /// modified on error.
    pub fn train_from_values(&mut self, patterns: &[Vec<i32>]) -> Result<()> {
        let validated = patterns
            .iter()
            .map(|values| Pattern::new(values, self.size))
            .collect::<Result<Vec<_>>>()?;
        self.train(&validated)
    }

    /// Replace the thresholds
    ///
    /// # Errors
    /// `Shape` if an `Initial` pattern does not have `size()` neurons.
    pub fn set_thresholds(&mut self, mode: ThresholdMode) -> Result<()> {
        let thresholds = mode.thresholds(self.size)?;
        debug!("[HEBBIAN] Threshold mode set to '{}'", mode.name());
        self.thresholds = thresholds;
        self.threshold_mode = mode;
        Ok(())
    }

    /// Replace the thresholds from a string-keyed mode
    ///
    /// See [`ThresholdMode::resolve`] for the accepted names and errors.
    pub fn set_thresholds_named(
        &mut self,
        mode: &str,
        constant: Option<i32>,
        initial: Option<&[i32]>,
    ) -> Result<()> {
        let mode = ThresholdMode::resolve(mode, constant, initial, self.size)?;
        self.set_thresholds(mode)
    }

    /// Local field of neuron `k`: row k of W dotted with `state`, minus θ_k
    ///
    /// Hot path: the state length is only checked in debug builds.
    ///
    /// # Panics
    /// Panics if `k >= size()`.
    #[inline]
    pub fn local_field(&self, k: usize, state: &[i8]) -> i64 {
        debug_assert_eq!(state.len(), self.size);
        dynamics::local_field(self.weights.row(k), state, self.thresholds[k])
    }

    /// E(s) = −½·sᵗWs + Σ θ_k·s_k
    ///
    /// # Errors
    /// `Shape` if `state` does not have `size()` neurons.
    pub fn energy<S: AsRef<[i8]> + ?Sized>(&self, state: &S) -> Result<f64> {
        let state = state.as_ref();
        if state.len() != self.size {
            return Err(HopfieldError::shape(self.size, state.len()));
        }
        Ok(self.energy_unchecked(state))
    }

    /// Energy without the length check, for callers that validated already
    #[inline]
    pub fn energy_unchecked(&self, state: &[i8]) -> f64 {
        dynamics::energy(self.weights.rows(), &self.thresholds, state)
    }

    pub fn is_symmetric(&self) -> bool {
        self.weights == self.weights.t()
    }

    pub fn has_zero_diagonal(&self) -> bool {
        self.weights.diag().iter().all(|&w| w == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(values: &[i32]) -> Pattern {
        Pattern::new(values, values.len()).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(WeightStore::new(0), Err(HopfieldError::Config(_))));
    }

    #[test]
    fn test_single_pattern_outer_product() {
        let mut store = WeightStore::new(3).unwrap();
        store.train(&[pattern(&[1, -1, 1])]).unwrap();

        let expected = ndarray::arr2(&[[0, -1, 1], [-1, 0, -1], [1, -1, 0]]);
        assert_eq!(store.weights(), expected.view());
        assert_eq!(store.pattern_count(), 1);
    }

    #[test]
    fn test_two_patterns_accumulate_within_one_call() {
        let mut store = WeightStore::new(4).unwrap();
        store
            .train(&[pattern(&[1, 1, -1, -1]), pattern(&[1, -1, 1, -1])])
            .unwrap();

        assert_eq!(store.weight(0, 1), Some(0));
        assert_eq!(store.weight(0, 3), Some(-2));
        assert_eq!(store.weight(1, 2), Some(-2));
        assert!(store.is_symmetric());
        assert!(store.has_zero_diagonal());
    }

    #[test]
    fn test_empty_training_resets() {
        let mut store = WeightStore::new(3).unwrap();
        store.train(&[pattern(&[1, 1, 1])]).unwrap();
        store.train(&[]).unwrap();
        assert!(store.weights().iter().all(|&w| w == 0));
        assert_eq!(store.pattern_count(), 0);
    }

    #[test]
    fn test_train_from_values_alphabet_error() {
        let mut store = WeightStore::new(4).unwrap();
        let err = store
            .train_from_values(&[vec![1, -1, 1, -1], vec![1, 0, 1, -1]])
            .unwrap_err();
        assert_eq!(err, HopfieldError::Alphabet { index: 1, value: 0 });
        assert_eq!(store.pattern_count(), 0);
    }

    #[test]
    fn test_local_field_includes_threshold() {
        let mut store = WeightStore::new(3).unwrap();
        store.train(&[pattern(&[1, 1, 1])]).unwrap();
        store.set_thresholds(ThresholdMode::Constant(1)).unwrap();
        assert_eq!(store.local_field(0, &[1, 1, 1]), 1);
        assert_eq!(store.local_field(0, &[1, -1, -1]), -3);
    }

    #[test]
    fn test_energy_shape_error() {
        let store = WeightStore::new(3).unwrap();
        let probe = pattern(&[1, 1]);
        assert!(matches!(
            store.energy(&probe),
            Err(HopfieldError::Shape { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_capacity_estimate() {
        assert_eq!(WeightStore::new(100).unwrap().capacity_estimate(), 13);
        assert_eq!(WeightStore::new(8).unwrap().capacity_estimate(), 1);
    }
}
