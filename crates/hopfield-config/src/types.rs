// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `hopfield_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HopfieldConfig {
    pub network: NetworkConfig,
    pub thresholds: ThresholdConfig,
    pub relaxation: RelaxationSettings,
    pub logging: LoggingConfig,
}

/// Network dimensions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of neurons (K)
    pub size: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { size: 100 }
    }
}

/// Threshold mode applied after training
///
/// `mode` is one of `"zero"`, `"constant"` or `"initial"`. `constant` is
/// required by `"constant"`, `initial` by `"initial"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub mode: String,
    pub constant: Option<i32>,
    pub initial: Option<Vec<i32>>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            mode: "zero".to_string(),
            constant: None,
            initial: None,
        }
    }
}

/// Relaxation loop settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RelaxationSettings {
    /// Sweep budget per recall
    pub max_steps: usize,
    /// Seed for the recall RNG
    pub seed: u64,
    /// Keep a copy of the state after every sweep
    pub record_states: bool,
}

impl Default for RelaxationSettings {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            seed: 42,
            record_states: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `"text"` or `"json"`
    pub format: String,
    /// Sweeps between energy log lines for networks too large to draw
    pub energy_log_interval: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            energy_log_interval: 10,
        }
    }
}
