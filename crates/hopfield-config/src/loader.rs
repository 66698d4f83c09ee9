// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, HopfieldConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for when no path is given
pub const CONFIG_FILE_NAME: &str = "hopfield_configuration.toml";

/// Find the Hopfield configuration file
///
/// Search order:
/// 1. `HOPFIELD_CONFIG_PATH` environment variable
/// 2. Current working directory: `./hopfield_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("HOPFIELD_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by HOPFIELD_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet HOPFIELD_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Call [`validate_config`](crate::validate_config) on the result before use.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<HopfieldConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: HopfieldConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Like [`load_config`] with discovery, falling back to defaults when no file exists
///
/// Environment and CLI overrides still apply on top of the defaults.
pub fn load_config_or_default(
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<HopfieldConfig> {
    match load_config(None, cli_args) {
        Err(ConfigError::FileNotFound(_)) => {
            let mut config = HopfieldConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        other => other,
    }
}

fn parse_into<T: FromStr>(value: &str, slot: &mut T) {
    if let Ok(parsed) = value.trim().parse::<T>() {
        *slot = parsed;
    }
}

fn parse_bool(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `HOPFIELD_NETWORK_SIZE` -> `network.size`
/// - `HOPFIELD_MAX_STEPS` -> `relaxation.max_steps`
/// - `HOPFIELD_SEED` -> `relaxation.seed`
/// - `HOPFIELD_THRESHOLD_MODE` -> `thresholds.mode`
/// - `HOPFIELD_THRESHOLD_CONSTANT` -> `thresholds.constant`
/// - `HOPFIELD_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut HopfieldConfig) {
    if let Ok(value) = env::var("HOPFIELD_NETWORK_SIZE") {
        parse_into(&value, &mut config.network.size);
    }
    if let Ok(value) = env::var("HOPFIELD_MAX_STEPS") {
        parse_into(&value, &mut config.relaxation.max_steps);
    }
    if let Ok(value) = env::var("HOPFIELD_SEED") {
        parse_into(&value, &mut config.relaxation.seed);
    }
    if let Ok(value) = env::var("HOPFIELD_THRESHOLD_MODE") {
        config.thresholds.mode = value;
    }
    if let Ok(value) = env::var("HOPFIELD_THRESHOLD_CONSTANT") {
        if let Ok(constant) = value.trim().parse::<i32>() {
            config.thresholds.constant = Some(constant);
        }
    }
    if let Ok(value) = env::var("HOPFIELD_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"network_size": "64", "seed": "7"}`)
pub fn apply_cli_overrides(config: &mut HopfieldConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("network_size") {
        parse_into(value, &mut config.network.size);
    }
    if let Some(value) = cli_args.get("max_steps") {
        parse_into(value, &mut config.relaxation.max_steps);
    }
    if let Some(value) = cli_args.get("seed") {
        parse_into(value, &mut config.relaxation.seed);
    }
    if let Some(value) = cli_args.get("record_states") {
        config.relaxation.record_states = parse_bool(value);
    }
    if let Some(value) = cli_args.get("threshold_mode") {
        config.thresholds.mode = value.clone();
    }
    if let Some(value) = cli_args.get("threshold_constant") {
        if let Ok(constant) = value.trim().parse::<i32>() {
            config.thresholds.constant = Some(constant);
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }
    if let Some(value) = cli_args.get("energy_log_interval") {
        parse_into(value, &mut config.logging.energy_log_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 6] = [
        "HOPFIELD_NETWORK_SIZE",
        "HOPFIELD_MAX_STEPS",
        "HOPFIELD_SEED",
        "HOPFIELD_THRESHOLD_MODE",
        "HOPFIELD_THRESHOLD_CONSTANT",
        "HOPFIELD_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("HOPFIELD_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("HOPFIELD_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        env::set_var("HOPFIELD_CONFIG_PATH", dir.path().join("nope.toml"));
        let result = find_config_file();
        env::remove_var("HOPFIELD_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "size = 64").unwrap();
        writeln!(file, "[thresholds]").unwrap();
        writeln!(file, "mode = \"constant\"").unwrap();
        writeln!(file, "constant = 2").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.network.size, 64);
        assert_eq!(config.thresholds.mode, "constant");
        assert_eq!(config.thresholds.constant, Some(2));
        assert_eq!(config.relaxation.max_steps, 1000);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[network\nsize = ").unwrap();

        assert!(matches!(
            load_config(Some(&config_path), None),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let mut config = HopfieldConfig::default();

        env::set_var("HOPFIELD_NETWORK_SIZE", "256");
        env::set_var("HOPFIELD_SEED", "9");
        env::set_var("HOPFIELD_THRESHOLD_CONSTANT", "-1");
        env::set_var("HOPFIELD_MAX_STEPS", "not-a-number");

        apply_environment_overrides(&mut config);
        clear_env();

        assert_eq!(config.network.size, 256);
        assert_eq!(config.relaxation.seed, 9);
        assert_eq!(config.thresholds.constant, Some(-1));
        assert_eq!(config.relaxation.max_steps, 1000);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = HopfieldConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("network_size".to_string(), "32".to_string());
        cli_args.insert("record_states".to_string(), "false".to_string());
        cli_args.insert("log_format".to_string(), "json".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.network.size, 32);
        assert!(!config.relaxation.record_states);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[relaxation]").unwrap();
        writeln!(file, "seed = 1").unwrap();
        writeln!(file, "max_steps = 50").unwrap();

        env::set_var("HOPFIELD_SEED", "2");
        env::set_var("HOPFIELD_MAX_STEPS", "60");

        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "3".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_env();

        // CLI wins for seed, env wins for max_steps (no CLI override)
        assert_eq!(config.relaxation.seed, 3);
        assert_eq!(config.relaxation.max_steps, 60);
    }
}
