// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-hopfield-npu-plasticity`, `--debug-hopfield-npu-burst-engine`, etc.
//! to enable/disable observability per crate.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Crates with debug logging switched on
///
/// # Example
/// ```rust
/// use hopfield_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(std::env::args());
/// if flags.is_enabled("hopfield-npu-burst-engine") {
///     // Per-sweep summaries will be logged
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Collect `--debug-<crate>` and `--debug-all` from an argument list
    ///
    /// Other arguments are ignored, so the full `env::args()` can be passed.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            match arg.strip_prefix("--debug-") {
                Some("all") => flags.enable_all(),
                Some(crate_name) if !crate_name.is_empty() => flags.enable(crate_name),
                _ => {}
            }
        }
        flags
    }

    fn enable(&mut self, crate_name: &str) {
        self.enabled.insert(crate_name.to_string());
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled.contains(crate_name)
    }

    /// Enabled crate names in sorted order
    pub fn enabled_crates(&self) -> Vec<&str> {
        self.enabled.iter().map(String::as_str).collect()
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled.is_empty()
    }

    /// `EnvFilter` directive string with `info` for crates without a flag
    ///
    /// Format: "hopfield_npu_burst_engine=debug,info" or "info" if none enabled.
    pub fn to_filter_string(&self) -> String {
        self.filter_with_default("info")
    }

    /// Like [`to_filter_string`](Self::to_filter_string) with a custom level
    /// for crates without a debug flag
    ///
    /// Crate names are converted to their module-path targets (`-` becomes `_`).
    pub fn filter_with_default(&self, default_level: &str) -> String {
        let default_level = default_level.trim().to_ascii_lowercase();
        self.enabled
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .chain(std::iter::once(default_level))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Merge a `HOPFIELD_DEBUG` style value ("all" or comma-separated crate names)
    pub fn merge_env_value(&mut self, env_var: &str) {
        if env_var.trim() == "all" {
            self.enable_all();
            return;
        }

        for crate_name in env_var.split(',').map(str::trim) {
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }
}

/// Helper function to parse debug flags from environment
///
/// Checks both command-line arguments and `HOPFIELD_DEBUG` environment variable.
/// Environment variable format: comma-separated crate names, e.g., "hopfield-npu-plasticity,hopfield-npu-burst-engine"
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("HOPFIELD_DEBUG") {
        flags.merge_env_value(&env_var);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  HOPFIELD_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  HOPFIELD_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-hopfield-npu-burst-engine
  --debug-hopfield-npu-plasticity --debug-hopfield-npu-burst-engine
  HOPFIELD_DEBUG=hopfield-npu-plasticity,hopfield-npu-burst-engine
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-hopfield-npu-plasticity".to_string()]);
        assert!(flags.is_enabled("hopfield-npu-plasticity"));
        assert!(!flags.is_enabled("hopfield-npu-burst-engine"));
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string_uses_module_targets() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-hopfield-npu-burst-engine".to_string(),
            "--debug-hopfield-config".to_string(),
        ]);
        assert_eq!(
            flags.to_filter_string(),
            "hopfield_config=debug,hopfield_npu_burst_engine=debug,info"
        );
        assert_eq!(
            CrateDebugFlags::default().filter_with_default("WARN"),
            "warn"
        );
    }

    #[test]
    fn test_env_value_merge() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value(" hopfield-npu-neural , ,hopfield-npu-plasticity");
        assert!(flags.is_enabled("hopfield-npu-neural"));
        assert!(flags.is_enabled("hopfield-npu-plasticity"));
        assert_eq!(flags.enabled_crates().len(), 2);

        let mut all = CrateDebugFlags::default();
        all.merge_env_value("all");
        assert_eq!(all.enabled_crates().len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "recall_demo".to_string(),
            "--network_size=64".to_string(),
            "--debug-".to_string(),
        ]);
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string(), "info");
    }
}
