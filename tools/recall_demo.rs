// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Recall Demonstration

Trains a network on seeded random patterns, corrupts one of them and recalls
it, logging the energy descent and the recall accuracy.

Usage:
  cargo run --bin recall_demo -- [--key=value ...] [--debug-<crate>]

Keys:
  network_size, max_steps, seed, record_states, threshold_mode,
  threshold_constant, log_level, log_format, energy_log_interval
  patterns   number of patterns to store (default: 5% of network_size)
  noise      fraction of neurons flipped in the probe (default: 0.1)

Example:
  cargo run --bin recall_demo -- --network_size=64 --patterns=3 --debug-hopfield-npu-burst-engine
*/

use std::collections::HashMap;
use std::env;

use anyhow::{bail, Context, Result};
use hopfield::config::{load_config_or_default, validate_config};
use hopfield::observability::{debug_flags_help, init_logging, parse_debug_flags, LogFormat};
use hopfield::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

const USAGE: &str = "Usage: recall_demo [--key=value ...] [--debug-<crate>]
Keys: network_size, max_steps, seed, record_states, threshold_mode, threshold_constant,
      log_level, log_format, energy_log_interval, patterns, noise";

/// Collect `--key=value` arguments, skipping debug flags
fn parse_cli_overrides<I>(args: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = String>,
{
    let mut overrides = HashMap::new();
    for arg in args {
        if arg.starts_with("--debug-") {
            continue;
        }
        let Some(pair) = arg.strip_prefix("--") else {
            bail!("Unexpected argument '{}'\n{}", arg, USAGE);
        };
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Expected --key=value, got '{}'\n{}", arg, USAGE);
        };
        overrides.insert(key.to_string(), value.to_string());
    }
    Ok(overrides)
}

/// Number of patterns to store: `--patterns`, or 5% of the network
fn resolve_pattern_count(overrides: &HashMap<String, String>, size: usize) -> Result<usize> {
    let count = match overrides.get("patterns") {
        Some(value) => value
            .parse::<usize>()
            .with_context(|| format!("Invalid pattern count '{}'", value))?,
        None => (size / 20).max(1),
    };
    if count == 0 {
        bail!("--patterns must be at least 1");
    }
    Ok(count)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}\n\n{}", USAGE, debug_flags_help());
        return Ok(());
    }

    let overrides = parse_cli_overrides(args)?;
    let config = load_config_or_default(Some(&overrides)).context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    let format: LogFormat = config
        .logging
        .format
        .parse()
        .map_err(anyhow::Error::msg)?;
    let debug_flags = parse_debug_flags();
    init_logging(&debug_flags, &config.logging.level, format)?;
    if debug_flags.any_enabled() {
        info!("Debug logging enabled for {}", debug_flags.enabled_crates().join(", "));
    }

    let size = config.network.size;
    let pattern_count = resolve_pattern_count(&overrides, size)?;
    let noise = match overrides.get("noise") {
        Some(value) => value
            .parse::<f64>()
            .with_context(|| format!("Invalid noise fraction '{}'", value))?,
        None => 0.1,
    };

    let mut memory = AssociativeMemory::from_config(&config)?;
    let mut rng = StdRng::seed_from_u64(config.relaxation.seed);
    let patterns = random_patterns(pattern_count, size, &mut rng);
    memory.store(&patterns)?;

    let capacity = memory.shared_store().read().capacity_estimate();
    if pattern_count > capacity {
        warn!(
            "Storing {} patterns in {} neurons (capacity ~{}); recall may land on spurious states",
            pattern_count, size, capacity
        );
    }

    let target = patterns.first().context("No patterns to probe")?;
    let probe = corrupt(target, noise, &mut rng)?;
    info!(
        "Probe differs from pattern 0 in {} of {} neurons",
        hamming_distance(probe.as_slice(), target.as_slice())?,
        size
    );

    let trajectory = memory.recall(&probe)?;
    let accuracy = recall_accuracy(trajectory.final_state.as_slice(), target.as_slice())?;
    let similarity = overlap(trajectory.final_state.as_slice(), target.as_slice())?;

    info!(
        "Outcome {:?} after {} sweep(s); energy {:.1} -> {:.1}",
        trajectory.outcome,
        trajectory.steps(),
        memory.energy(&probe)?,
        trajectory.final_energy().unwrap_or(f64::NAN)
    );
    info!(
        "Recall accuracy {:.1}%, overlap {:.3}",
        accuracy * 100.0,
        similarity
    );
    if trajectory.final_state.matches(target) {
        info!("Pattern 0 recovered exactly");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(args: &[&str]) -> HashMap<String, String> {
        parse_cli_overrides(args.iter().map(|a| a.to_string())).unwrap()
    }

    #[test]
    fn test_zero_patterns_rejected() {
        let err = resolve_pattern_count(&overrides(&["--patterns=0"]), 16).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_pattern_count_default_and_override() {
        assert_eq!(resolve_pattern_count(&overrides(&[]), 200).unwrap(), 10);
        assert_eq!(resolve_pattern_count(&overrides(&[]), 8).unwrap(), 1);
        assert_eq!(resolve_pattern_count(&overrides(&["--patterns=3"]), 200).unwrap(), 3);
        assert!(resolve_pattern_count(&overrides(&["--patterns=many"]), 200).is_err());
    }

    #[test]
    fn test_debug_flags_skipped_in_overrides() {
        let parsed = overrides(&["--debug-all", "--seed=7"]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["seed"], "7");
        assert!(parse_cli_overrides(vec!["seed=7".to_string()]).is_err());
    }
}
