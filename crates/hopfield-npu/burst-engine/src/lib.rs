// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # Hopfield Burst Engine
//!
//! Asynchronous relaxation of a network state against a trained weight store.
//!
//! ## Architecture
//! - A sweep is strictly sequential: neuron k reads values written earlier
//!   in the same sweep
//! - Randomness is injected by the caller; nothing is global
//! - Independent recalls run in parallel with Rayon, each with its own seed
//! - Observers and cancellation are checked at sweep boundaries only

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod batch;
pub mod cancellation;
pub mod observer;
pub mod relaxation;

pub use batch::{probe_seed, recall_batch};
pub use cancellation::CancellationToken;
pub use observer::{EnergyLogObserver, NoopObserver, SweepObserver};
pub use relaxation::{
    RelaxationConfig, RelaxationEngine, RelaxationOutcome, SweepReport, Trajectory,
    DEFAULT_MAX_STEPS,
};
