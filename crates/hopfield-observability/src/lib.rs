// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # hopfield-observability
//!
//! Logging infrastructure shared by the Hopfield crates.
//!
//! Provides consistent logging setup across all workspace crates with
//! per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log file per run under a timestamped directory

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known workspace crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "hopfield",
    "hopfield-config",
    "hopfield-observability",
    "hopfield-npu-neural",
    "hopfield-npu-plasticity",
    "hopfield-npu-burst-engine",
];
