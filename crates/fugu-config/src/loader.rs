// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, FuguConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "fugu_configuration.toml";

/// Find the Fugu configuration file
///
/// Search order:
/// 1. `FUGU_CONFIG_PATH` environment variable
/// 2. Current working directory: `./fugu_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("FUGU_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by FUGU_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet FUGU_CONFIG_PATH to specify a custom location.",
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
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FuguConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: FuguConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    crate::validate_config(&config)?;
    Ok(config)
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `FUGU_LOG_LEVEL` -> `logging.level`
/// - `FUGU_LOG_DIR` -> `logging.log_dir`
/// - `FUGU_NEURON_THRESHOLD` -> `neuron.threshold`
/// - `FUGU_NEURON_DECAY` -> `neuron.decay`
/// - `FUGU_NEURON_P` -> `neuron.p`
/// - `FUGU_SUMMARY_VERBOSITY` -> `scaffold.summary_verbosity`
/// - `FUGU_LOG_SUMMARY` -> `scaffold.log_summary_after_lay`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut FuguConfig) {
    if let Ok(value) = env::var("FUGU_LOG_LEVEL") {
        config.logging.level = value.to_lowercase();
    }
    if let Ok(value) = env::var("FUGU_LOG_DIR") {
        config.logging.log_dir = value;
    }

    if let Ok(value) = env::var("FUGU_NEURON_THRESHOLD") {
        if let Ok(threshold) = value.parse::<f64>() {
            config.neuron.threshold = threshold;
        }
    }
    if let Ok(value) = env::var("FUGU_NEURON_DECAY") {
        if let Ok(decay) = value.parse::<f64>() {
            config.neuron.decay = decay;
        }
    }
    if let Ok(value) = env::var("FUGU_NEURON_P") {
        if let Ok(p) = value.parse::<f64>() {
            config.neuron.p = p;
        }
    }

    if let Ok(value) = env::var("FUGU_SUMMARY_VERBOSITY") {
        if let Ok(verbosity) = value.parse::<u8>() {
            config.scaffold.summary_verbosity = verbosity;
        }
    }
    if let Ok(value) = env::var("FUGU_LOG_SUMMARY") {
        config.scaffold.log_summary_after_lay = parse_bool(&value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"log_level": "debug", "verbosity": "2"}`)
pub fn apply_cli_overrides(config: &mut FuguConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.to_lowercase();
    }
    if let Some(value) = cli_args.get("verbosity") {
        if let Ok(verbosity) = value.parse::<u8>() {
            config.scaffold.summary_verbosity = verbosity;
        }
    }
    if let Some(value) = cli_args.get("log_summary") {
        config.scaffold.log_summary_after_lay = parse_bool(value);
    }
    if let Some(value) = cli_args.get("threshold") {
        if let Ok(threshold) = value.parse::<f64>() {
            config.neuron.threshold = threshold;
        }
    }
}
