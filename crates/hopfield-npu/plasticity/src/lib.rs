// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Hopfield Plasticity Module
//!
//! The weight store of a discrete Hopfield network:
//! - Hebbian (outer-product) training with a forced zero diagonal
//! - Per-neuron thresholds (zero, constant, or copied from an initial state)
//! - Energy and local field evaluation against the stored weights
//! - A lock-guarded shared store for concurrent recall
//! - JSON snapshots of trained weights
//!
//! ## Invariants
//! - The weight matrix is symmetric with a zero diagonal
//! - Training replaces previous weights; it never accumulates across calls
//! - Every validation error is raised before any field is modified

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod hebbian;
pub mod shared_store;
pub mod snapshot;

// Re-export key types
pub use hebbian::WeightStore;
pub use shared_store::SharedWeightStore;
pub use snapshot::WeightSnapshot;
