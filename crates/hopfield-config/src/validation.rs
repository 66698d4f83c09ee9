// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges. Every violation is collected before
//! reporting.

use crate::{ConfigError, ConfigResult, HopfieldConfig};

/// Threshold modes understood by the weight store
pub const THRESHOLD_MODES: [&str; 3] = ["zero", "constant", "initial"];

/// Log formats understood by the logging initializer
pub const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Positive network size, sweep budget and energy log interval
/// - A known threshold mode with its required parameter
/// - A known log format
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &HopfieldConfig) -> ConfigResult<()> {
    let errors = collect_violations(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Every violation in `config`, in section order
pub fn collect_violations(config: &HopfieldConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_value_ranges(config, &mut errors);
    validate_thresholds(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn validate_value_ranges(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.network.size == 0 {
        errors.push(invalid("network.size", "must be greater than 0"));
    }
    if config.relaxation.max_steps == 0 {
        errors.push(invalid("relaxation.max_steps", "must be greater than 0"));
    }
    if config.logging.energy_log_interval == 0 {
        errors.push(invalid("logging.energy_log_interval", "must be greater than 0"));
    }
}

fn validate_thresholds(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let mode = config.thresholds.mode.trim().to_ascii_lowercase();
    match mode.as_str() {
        "zero" => {}
        "constant" => {
            if config.thresholds.constant.is_none() {
                errors.push(ConfigValidationError::MissingRequired {
                    field: "thresholds.constant".to_string(),
                });
            }
        }
        "initial" => match &config.thresholds.initial {
            None => errors.push(ConfigValidationError::MissingRequired {
                field: "thresholds.initial".to_string(),
            }),
            Some(initial) if initial.len() != config.network.size => errors.push(invalid(
                "thresholds.initial",
                format!(
                    "has {} values but network.size is {}",
                    initial.len(),
                    config.network.size
                ),
            )),
            Some(_) => {}
        },
        other => errors.push(invalid(
            "thresholds.mode",
            format!("'{}' is not one of {}", other, THRESHOLD_MODES.join(", ")),
        )),
    }
}

fn validate_logging(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let format = config.logging.format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(invalid(
            "logging.format",
            format!("'{}' is not one of {}", config.logging.format, LOG_FORMATS.join(", ")),
        ));
    }
}
