// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Console logging (text or JSON) filtered by per-crate debug flags, and an
//! optional per-run JSON log file behind the `file-logging` feature.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;
use crate::config::LogFormat;

/// Build the `EnvFilter` for `default_level` plus the enabled debug flags
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.filter_with_default(default_level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global console subscriber
///
/// Returns `Ok(false)` without touching anything if a global subscriber is
/// already installed, so repeated calls are harmless.
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    format: LogFormat,
) -> Result<bool> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }
    let filter = build_filter(debug_flags, default_level)?;

    let installed = match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init(),
    };
    installed
        .map(|_| true)
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(feature = "file-logging")]
pub use file::{init_file_logging, LoggingGuard};

#[cfg(feature = "file-logging")]
mod file {
    use std::path::{Path, PathBuf};

    use anyhow::{anyhow, Context, Result};
    use chrono::Utc;
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{Layer, Registry};

    use super::build_filter;
    use crate::cli::CrateDebugFlags;

    /// Keeps the background log writer alive; logs are flushed on drop
    pub struct LoggingGuard {
        _file_guard: tracing_appender::non_blocking::WorkerGuard,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Get the log directory path
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }

        pub fn log_file(&self) -> PathBuf {
            self.log_dir.join("hopfield.log")
        }
    }

    /// Initialize logging with console output and a JSON log file
    ///
    /// Creates a timestamped folder structure:
    /// ```text
    /// <log_dir>/
    ///   └── run_20250101_120000/
    ///       └── hopfield.log
    /// ```
    pub fn init_file_logging(
        debug_flags: &CrateDebugFlags,
        default_level: &str,
        log_dir: Option<PathBuf>,
    ) -> Result<LoggingGuard> {
        let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = base_log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(build_filter(debug_flags, default_level)?)
            .boxed();

        let file_appender = rolling::never(&run_folder, "hopfield.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(build_filter(debug_flags, default_level)?)
            .boxed();

        Registry::default()
            .with(vec![console_layer, file_layer])
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

        Ok(LoggingGuard {
            _file_guard: file_guard,
            log_dir: run_folder,
        })
    }
}
