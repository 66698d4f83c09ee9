// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Parallel recall of independent probes
//!
//! Probe `i` relaxes with its own `StdRng::seed_from_u64(base_seed + i)`, so
//! the results are identical to a sequential loop using the same seeds.

use hopfield_npu_neural::{Pattern, Result};
use hopfield_npu_plasticity::{SharedWeightStore, WeightStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

use crate::relaxation::{RelaxationEngine, Trajectory};

/// Seed used for the probe at `index`
#[inline]
pub fn probe_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Recall every probe in parallel against one consistent set of weights
///
/// A single read guard is held for the whole batch, so a concurrent
/// retraining waits until every probe has finished.
pub fn recall_batch(
    engine: &RelaxationEngine,
    shared: &SharedWeightStore,
    probes: &[Pattern],
    base_seed: u64,
) -> Vec<Result<Trajectory>> {
    let guard = shared.read();
    let store: &WeightStore = &guard;
    debug!(
        "[BATCH-RECALL] {} probe(s) on {} rayon thread(s)",
        probes.len(),
        rayon::current_num_threads()
    );

    probes
        .par_iter()
        .enumerate()
        .map(|(index, probe)| {
            let mut rng = StdRng::seed_from_u64(probe_seed(base_seed, index));
            engine.recall(store, probe, &mut rng)
        })
        .collect()
}
