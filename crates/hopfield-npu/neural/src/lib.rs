// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Hopfield Neural Computation
//!
//! Everything the weight store and the relaxation engine share:
//! - **Types**: `Pattern`, `NetworkState`, `ThresholdMode`, `HopfieldError`
//! - **Dynamics**: local field, sign update rule, energy kernels
//! - **Utils**: seeded pattern generation, corruption, overlap, ASCII rendering
//!
//! Neurons are bipolar (`-1`/`+1`) and stored as `i8`. Weights and thresholds
//! are integers, so energies are exact multiples of one half.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub mod dynamics;
pub mod utils;

pub use dynamics::*;
pub use utils::*;

pub use types::{
    HopfieldError, NetworkState, Pattern, Result, ThresholdMode, NEURON_OFF, NEURON_ON,
};
