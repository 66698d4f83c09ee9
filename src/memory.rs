// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configured associative memory
//!
//! Bundles a shared weight store, a relaxation engine and a seeded RNG built
//! from one [`HopfieldConfig`].

use hopfield_config::{validate_config, HopfieldConfig};
use hopfield_npu_burst_engine::{
    recall_batch, EnergyLogObserver, RelaxationConfig, RelaxationEngine, SweepObserver,
    Trajectory,
};
use hopfield_npu_neural::{HopfieldError, Pattern, Result, ThresholdMode};
use hopfield_npu_plasticity::{SharedWeightStore, WeightSnapshot, WeightStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// A trained (or trainable) Hopfield network with its own recall RNG
#[derive(Debug)]
pub struct AssociativeMemory {
    store: SharedWeightStore,
    engine: RelaxationEngine,
    rng: StdRng,
    energy_log_interval: usize,
}

impl AssociativeMemory {
    /// Build an untrained memory from configuration
    ///
    /// The threshold section is resolved before the rest is validated, so a
    /// bad initial threshold state reports the same error as a bad pattern.
    ///
    /// # Errors
    /// - `Config` for a zero network size, an unknown threshold mode or a
    ///   missing threshold parameter
    /// - `Shape` / `Alphabet` for an initial threshold state of the wrong
    ///   length or with values outside {-1, +1}
    /// - `Config` for any other validation failure
    pub fn from_config(config: &HopfieldConfig) -> Result<Self> {
        let size = config.network.size;
        let mut store = WeightStore::new(size)?;
        let mode = ThresholdMode::resolve(
            &config.thresholds.mode,
            config.thresholds.constant,
            config.thresholds.initial.as_deref(),
            size,
        )?;
        validate_config(config).map_err(|e| HopfieldError::config(e.to_string()))?;
        store.set_thresholds(mode)?;

        let engine = RelaxationEngine::new(RelaxationConfig {
            max_steps: config.relaxation.max_steps,
            record_states: config.relaxation.record_states,
        })?;

        info!(
            "[MEMORY] K={}, thresholds '{}', budget {} sweeps, seed {}",
            size,
            store.threshold_mode().name(),
            config.relaxation.max_steps,
            config.relaxation.seed
        );

        Ok(Self {
            store: SharedWeightStore::new(store),
            engine,
            rng: StdRng::seed_from_u64(config.relaxation.seed),
            energy_log_interval: config.logging.energy_log_interval,
        })
    }

    /// Rebuild a memory around a saved snapshot
    pub fn from_snapshot(config: &HopfieldConfig, snapshot: WeightSnapshot) -> Result<Self> {
        let mut memory = Self::from_config(config)?;
        let store = WeightStore::from_snapshot(snapshot)?;
        if store.size() != memory.size() {
            return Err(HopfieldError::shape(memory.size(), store.size()));
        }
        memory.store = SharedWeightStore::new(store);
        Ok(memory)
    }

    pub fn size(&self) -> usize {
        self.store.size()
    }

    pub fn engine(&self) -> &RelaxationEngine {
        &self.engine
    }

    /// Handle to the underlying store, shareable across threads
    pub fn shared_store(&self) -> SharedWeightStore {
        self.store.clone()
    }

    /// Train on `patterns`, replacing everything stored before
    pub fn store(&self, patterns: &[Pattern]) -> Result<()> {
        self.store.retrain(patterns)
    }

    /// Validate raw values and train on them
    pub fn store_values(&self, patterns: &[Vec<i32>]) -> Result<()> {
        let size = self.size();
        let validated = patterns
            .iter()
            .map(|values| Pattern::new(values, size))
            .collect::<Result<Vec<_>>>()?;
        self.store(&validated)
    }

    pub fn set_thresholds(&self, mode: ThresholdMode) -> Result<()> {
        self.store.set_thresholds(mode)
    }

    /// Recall from `probe`, logging progress through an [`EnergyLogObserver`]
    pub fn recall(&mut self, probe: &Pattern) -> Result<Trajectory> {
        let mut observer = EnergyLogObserver::new(self.energy_log_interval);
        self.recall_observed(probe, &mut observer)
    }

    pub fn recall_observed<O>(&mut self, probe: &Pattern, observer: &mut O) -> Result<Trajectory>
    where
        O: SweepObserver + ?Sized,
    {
        let store = self.store.read();
        let mut state = hopfield_npu_neural::NetworkState::from_pattern(probe);
        self.engine
            .relax_observed(&store, &mut state, &mut self.rng, observer)
    }

    /// Recall every probe in parallel
    ///
    /// The batch seed is drawn from the memory's RNG, so repeated batches
    /// differ while the whole sequence stays reproducible.
    pub fn recall_batch(&mut self, probes: &[Pattern]) -> Vec<Result<Trajectory>> {
        let base_seed: u64 = self.rng.gen();
        recall_batch(&self.engine, &self.store, probes, base_seed)
    }

    /// Energy of `state` under the current weights and thresholds
    pub fn energy(&self, state: &Pattern) -> Result<f64> {
        self.store.read().energy(state)
    }

    pub fn snapshot(&self) -> WeightSnapshot {
        self.store.snapshot()
    }
}
