// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron threshold configuration
//!
//! Thresholds are chosen once per experiment as a [`ThresholdMode`] and then
//! expanded into a per-neuron vector by the weight store.

use super::error::{HopfieldError, Result};
use super::pattern::Pattern;

/// How per-neuron thresholds are derived
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", content = "value", rename_all = "snake_case")
)]
pub enum ThresholdMode {
    /// Every threshold is 0
    #[default]
    Zero,
    /// Every threshold is the same constant
    Constant(i32),
    /// Thresholds copy a designated initial state
    Initial(Pattern),
}

impl ThresholdMode {
    /// Mode names accepted by [`ThresholdMode::resolve`]
    pub const NAMES: [&'static str; 3] = ["zero", "constant", "initial"];

    /// Resolve a string-keyed threshold configuration into a mode
    ///
    /// `constant` is required for `"constant"`, `initial` for `"initial"`;
    /// parameters that the chosen mode does not use are ignored. The initial
    /// state goes through the same validation as a training pattern.
    ///
    /// # Errors
    /// - `Config` for an unknown mode name or a missing parameter
    /// - `Shape` / `Alphabet` for an invalid initial state
    pub fn resolve(
        mode: &str,
        constant: Option<i32>,
        initial: Option<&[i32]>,
        size: usize,
    ) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(ThresholdMode::Zero),
            "constant" => constant.map(ThresholdMode::Constant).ok_or_else(|| {
                HopfieldError::config("threshold mode 'constant' requires a constant value")
            }),
            "initial" => {
                let values = initial.ok_or_else(|| {
                    HopfieldError::config("threshold mode 'initial' requires an initial state")
                })?;
                Ok(ThresholdMode::Initial(Pattern::new(values, size)?))
            }
            other => Err(HopfieldError::config(format!(
                "unknown threshold mode '{}' (expected one of: {})",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Short name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            ThresholdMode::Zero => "zero",
            ThresholdMode::Constant(_) => "constant",
            ThresholdMode::Initial(_) => "initial",
        }
    }

    /// Expand into one threshold per neuron
    ///
    /// # Errors
    /// `Shape` if an `Initial` pattern does not have `size` neurons.
    pub fn thresholds(&self, size: usize) -> Result<Vec<i32>> {
        match self {
            ThresholdMode::Zero => Ok(vec![0; size]),
            ThresholdMode::Constant(value) => Ok(vec![*value; size]),
            ThresholdMode::Initial(pattern) => {
                pattern.ensure_size(size)?;
                Ok(pattern.to_values())
            }
        }
    }
}
