// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Asynchronous Relaxation
//!
//! One step is one full sweep over all K neurons in a fresh random order.
//! Each neuron sees the values already written earlier in the same sweep.
//!
//! ```text
//! for step in 0..max_steps:
//!     order = shuffle(0..K)
//!     for k in order:
//!         z_k = W[k]·s − θ_k
//!         s_k = sign(z_k)   (unchanged when z_k == 0)
//!     record E(s)
//!     if no neuron flipped: Converged { step }
//! BudgetExhausted { steps: max_steps }
//! ```
//!
//! Every flip lowers the energy by `2·|z_k|`, so the recorded history never
//! increases.

use hopfield_npu_neural::{
    next_neuron_value, HopfieldError, NetworkState, Pattern, Result, NEURON_ON,
};
use hopfield_npu_plasticity::WeightStore;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cancellation::CancellationToken;
use crate::observer::{NoopObserver, SweepObserver};

/// Sweep budget used when none is configured
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Relaxation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxationConfig {
    /// Maximum number of full sweeps
    pub max_steps: usize,
    /// Keep a copy of the state after every sweep
    pub record_states: bool,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            record_states: true,
        }
    }
}

/// How a relaxation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RelaxationOutcome {
    /// Sweep `step` (0-based) produced no flips
    Converged { step: usize },
    /// `steps` sweeps ran without a flip-free sweep
    BudgetExhausted { steps: usize },
    /// Cancellation was observed after `step` completed sweeps
    Cancelled { step: usize },
}

/// Summary of one sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepReport {
    /// 0-based sweep index within the run
    pub step: usize,
    pub flips: usize,
    /// Energy after the sweep
    pub energy: f64,
}

impl SweepReport {
    pub fn is_stable(&self) -> bool {
        self.flips == 0
    }
}

/// Result of a relaxation run
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub final_state: NetworkState,
    /// Energy after each sweep
    pub energies: Vec<f64>,
    /// State after each sweep (empty unless `record_states`)
    pub states: Vec<NetworkState>,
    pub outcome: RelaxationOutcome,
}

impl Trajectory {
    pub fn converged(&self) -> bool {
        matches!(self.outcome, RelaxationOutcome::Converged { .. })
    }

    /// Number of sweeps performed
    pub fn steps(&self) -> usize {
        self.energies.len()
    }

    pub fn final_energy(&self) -> Option<f64> {
        self.energies.last().copied()
    }

    pub fn final_pattern(&self) -> Pattern {
        self.final_state.to_pattern()
    }
}

/// Drives asynchronous Hopfield updates against a weight store
#[derive(Debug, Clone)]
pub struct RelaxationEngine {
    config: RelaxationConfig,
}

impl RelaxationEngine {
    /// # Errors
    /// `Config` if `max_steps == 0`.
    pub fn new(config: RelaxationConfig) -> Result<Self> {
        if config.max_steps == 0 {
            return Err(HopfieldError::config("max_steps must be at least 1"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RelaxationConfig {
        &self.config
    }

    /// Run exactly one sweep
    ///
    /// The report's `step` is always 0.
    pub fn sweep<R: Rng + ?Sized>(
        &self,
        store: &WeightStore,
        state: &mut NetworkState,
        rng: &mut R,
    ) -> Result<SweepReport> {
        state.ensure_size(store.size())?;
        let mut order: Vec<usize> = (0..store.size()).collect();
        let flips = sweep_once(store, state, rng, &mut order);
        Ok(SweepReport {
            step: 0,
            flips,
            energy: store.energy_unchecked(state.as_slice()),
        })
    }

    /// Relax `state` in place until a flip-free sweep or the budget runs out
    pub fn relax<R: Rng + ?Sized>(
        &self,
        store: &WeightStore,
        state: &mut NetworkState,
        rng: &mut R,
    ) -> Result<Trajectory> {
        self.run(store, state, rng, &mut NoopObserver, None)
    }

    /// Like [`relax`](Self::relax), calling `observer` after every sweep
    pub fn relax_observed<R, O>(
        &self,
        store: &WeightStore,
        state: &mut NetworkState,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<Trajectory>
    where
        R: Rng + ?Sized,
        O: SweepObserver + ?Sized,
    {
        self.run(store, state, rng, observer, None)
    }

    /// Like [`relax_observed`](Self::relax_observed), stopping with
    /// `Cancelled` once `token` is set
    ///
    /// The token is checked before every sweep, never inside one.
    pub fn relax_cancellable<R, O>(
        &self,
        store: &WeightStore,
        state: &mut NetworkState,
        rng: &mut R,
        observer: &mut O,
        token: &CancellationToken,
    ) -> Result<Trajectory>
    where
        R: Rng + ?Sized,
        O: SweepObserver + ?Sized,
    {
        self.run(store, state, rng, observer, Some(token))
    }

    /// Relax a fresh state initialized from `probe`
    pub fn recall<R: Rng + ?Sized>(
        &self,
        store: &WeightStore,
        probe: &Pattern,
        rng: &mut R,
    ) -> Result<Trajectory> {
        let mut state = NetworkState::from_pattern(probe);
        self.relax(store, &mut state, rng)
    }

    fn run<R, O>(
        &self,
        store: &WeightStore,
        state: &mut NetworkState,
        rng: &mut R,
        observer: &mut O,
        token: Option<&CancellationToken>,
    ) -> Result<Trajectory>
    where
        R: Rng + ?Sized,
        O: SweepObserver + ?Sized,
    {
        state.ensure_size(store.size())?;

        let max_steps = self.config.max_steps;
        let mut energies = Vec::with_capacity(max_steps.min(64));
        let mut states = Vec::new();
        let mut order: Vec<usize> = (0..store.size()).collect();
        let mut outcome = RelaxationOutcome::BudgetExhausted { steps: max_steps };

        for step in 0..max_steps {
            if token.is_some_and(CancellationToken::is_cancelled) {
                outcome = RelaxationOutcome::Cancelled { step };
                break;
            }

            let flips = sweep_once(store, state, rng, &mut order);
            let energy = store.energy_unchecked(state.as_slice());
            energies.push(energy);
            if self.config.record_states {
                states.push(state.clone());
            }

            let report = SweepReport { step, flips, energy };
            debug!(
                "[RELAXATION] Sweep {}: {} flip(s), energy {:.1}",
                step, flips, energy
            );
            observer.on_sweep(&report, state);

            if report.is_stable() {
                outcome = RelaxationOutcome::Converged { step };
                break;
            }
        }

        match outcome {
            RelaxationOutcome::Converged { step } => {
                info!("[RELAXATION] Converged at sweep {} (K={})", step, store.size())
            }
            RelaxationOutcome::BudgetExhausted { steps } => warn!(
                "[RELAXATION] No stable state within {} sweeps (K={})",
                steps,
                store.size()
            ),
            RelaxationOutcome::Cancelled { step } => {
                info!("[RELAXATION] Cancelled after {} sweep(s)", step)
            }
        }
        observer.on_finish(&outcome, state);

        Ok(Trajectory {
            final_state: state.clone(),
            energies,
            states,
            outcome,
        })
    }
}

/// One asynchronous sweep; returns the number of flips
///
/// `order` must hold a permutation of `0..K` and is reshuffled in place.
fn sweep_once<R: Rng + ?Sized>(
    store: &WeightStore,
    state: &mut NetworkState,
    rng: &mut R,
    order: &mut [usize],
) -> usize {
    order.shuffle(rng);
    let mut flips = 0;
    for &k in order.iter() {
        let field = store.local_field(k, state.as_slice());
        let current = state.as_slice()[k];
        let next = next_neuron_value(field, current);
        if state.set_active(k, next == NEURON_ON) {
            flips += 1;
        }
    }
    flips
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const P1: [i32; 8] = [1, 1, 1, -1, -1, -1, 1, 1];
    const P2: [i32; 8] = [-1, -1, 1, 1, -1, 1, -1, 1];

    fn store_with(patterns: &[[i32; 8]]) -> WeightStore {
        let mut store = WeightStore::new(8).unwrap();
        let values: Vec<Vec<i32>> = patterns.iter().map(|p| p.to_vec()).collect();
        store.train_from_values(&values).unwrap();
        store
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = RelaxationConfig {
            max_steps: 0,
            record_states: false,
        };
        assert!(matches!(
            RelaxationEngine::new(config),
            Err(HopfieldError::Config(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let config = RelaxationConfig::default();
        assert_eq!(config.max_steps, 1000);
        assert!(config.record_states);
    }

    #[test]
    fn test_stored_pattern_converges_immediately() {
        let store = store_with(&[P1]);
        let engine = RelaxationEngine::new(RelaxationConfig::default()).unwrap();
        let mut state = NetworkState::new(&P1, 8).unwrap();

        let trajectory = engine
            .relax(&store, &mut state, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(trajectory.outcome, RelaxationOutcome::Converged { step: 0 });
        assert_eq!(trajectory.final_state.as_slice(), &[1, 1, 1, -1, -1, -1, 1, 1]);
        assert_eq!(state, trajectory.final_state);
        assert_eq!(trajectory.energies, vec![-28.0]);
        assert_eq!(trajectory.states.len(), 1);
    }

    #[test]
    fn test_single_flip_recovered_by_second_sweep() {
        let store = store_with(&[P1, P2]);
        let engine = RelaxationEngine::new(RelaxationConfig::default()).unwrap();
        let mut probe = P1;
        probe[2] = -probe[2];

        for seed in 0..20 {
            let mut state = NetworkState::new(&probe, 8).unwrap();
            let trajectory = engine
                .relax(&store, &mut state, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert_eq!(trajectory.final_state.as_slice(), &[1, 1, 1, -1, -1, -1, 1, 1]);
            assert_eq!(trajectory.outcome, RelaxationOutcome::Converged { step: 1 });
        }
    }

    #[test]
    fn test_wrong_length_state_rejected_before_running() {
        let store = store_with(&[P1]);
        let engine = RelaxationEngine::new(RelaxationConfig::default()).unwrap();
        let mut state = NetworkState::new(&[1, -1, 1], 3).unwrap();
        let err = engine
            .relax(&store, &mut state, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err, HopfieldError::Shape { expected: 8, actual: 3 });
        assert_eq!(state.as_slice(), &[1, -1, 1]);
    }

    #[test]
    fn test_state_history_optional() {
        let store = store_with(&[P1]);
        let engine = RelaxationEngine::new(RelaxationConfig {
            max_steps: 10,
            record_states: false,
        })
        .unwrap();
        let probe = Pattern::new(&P1, 8).unwrap();
        let trajectory = engine
            .recall(&store, &probe, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!(trajectory.states.is_empty());
        assert_eq!(trajectory.steps(), 1);
    }

    #[test]
    fn test_cancelled_before_first_sweep() {
        let store = store_with(&[P1]);
        let engine = RelaxationEngine::new(RelaxationConfig::default()).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let mut state = NetworkState::new(&P2, 8).unwrap();
        let trajectory = engine
            .relax_cancellable(
                &store,
                &mut state,
                &mut StdRng::seed_from_u64(0),
                &mut NoopObserver,
                &token,
            )
            .unwrap();

        assert_eq!(trajectory.outcome, RelaxationOutcome::Cancelled { step: 0 });
        assert!(trajectory.energies.is_empty());
        assert_eq!(trajectory.final_state.as_slice(), NetworkState::new(&P2, 8).unwrap().as_slice());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_string(&RelaxationOutcome::Converged { step: 3 }).unwrap();
        assert_eq!(json, r#"{"outcome":"converged","step":3}"#);
    }
}
