// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neural Types Module
//!
//! Core type definitions for Hopfield pattern storage and recall.

pub mod error;
pub mod pattern;
pub mod threshold;

// Re-export commonly used types
pub use error::{HopfieldError, Result};
pub use pattern::{NetworkState, Pattern, NEURON_OFF, NEURON_ON};
pub use threshold::ThresholdMode;
