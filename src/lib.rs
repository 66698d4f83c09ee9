// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hopfield - Discrete Associative Memory
//!
//! Stores bipolar patterns in a symmetric weight matrix with the Hebbian rule
//! and recalls them from corrupted probes by asynchronous, energy-descending
//! relaxation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hopfield::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut memory = AssociativeMemory::from_config(&HopfieldConfig::default())?;
//! let mut rng = StdRng::seed_from_u64(1);
//! let patterns = random_patterns(5, memory.size(), &mut rng);
//! memory.store(&patterns)?;
//!
//! let probe = corrupt(&patterns[0], 0.1, &mut rng)?;
//! let trajectory = memory.recall(&probe)?;
//! assert!(trajectory.converged());
//! # Ok::<(), HopfieldError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: hopfield-npu-neural                        │
//! │  (Pattern, NetworkState, ThresholdMode, kernels)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Learning: hopfield-npu-plasticity                      │
//! │  (Hebbian weight store, shared store, snapshots)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Recall: hopfield-npu-burst-engine                      │
//! │  (Asynchronous relaxation, observers, batch recall)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use hopfield_npu_neural as neural;

// Re-export algorithms
pub use hopfield_npu_burst_engine as burst_engine;
pub use hopfield_npu_plasticity as plasticity;

// Re-export infrastructure
pub use hopfield_config as config;
pub use hopfield_observability as observability;

pub mod memory;

pub use memory::AssociativeMemory;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::memory::AssociativeMemory;

    pub use crate::neural::{
        corrupt, hamming_distance, overlap, random_pattern, random_patterns, recall_accuracy,
        render_ascii, HopfieldError, NetworkState, Pattern, ThresholdMode,
    };

    pub use crate::plasticity::{SharedWeightStore, WeightSnapshot, WeightStore};

    pub use crate::burst_engine::{
        recall_batch, CancellationToken, EnergyLogObserver, RelaxationConfig, RelaxationEngine,
        RelaxationOutcome, SweepObserver, SweepReport, Trajectory,
    };

    pub use crate::config::HopfieldConfig;
}
