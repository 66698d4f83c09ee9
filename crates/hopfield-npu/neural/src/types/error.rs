// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for Hopfield operations
//!
//! Every error is raised before any state is mutated: callers never observe a
//! half-trained weight store or a partially updated network state.

/// Error types for Hopfield operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HopfieldError {
    /// Pattern or state length does not match the network size
    #[error("Shape mismatch: expected {expected} neurons, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// Element outside the bipolar alphabet {-1, +1}
    #[error("Invalid neuron value {value} at index {index}: expected -1 or +1")]
    Alphabet { index: usize, value: i32 },

    /// Invalid or missing configuration parameter
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed weight snapshot
    #[error("Invalid weight snapshot: {0}")]
    Snapshot(String),
}

impl HopfieldError {
    /// Shorthand for a shape error
    pub fn shape(expected: usize, actual: usize) -> Self {
        HopfieldError::Shape { expected, actual }
    }

    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        HopfieldError::Config(msg.into())
    }
}

pub type Result<T> = core::result::Result<T, HopfieldError>;
