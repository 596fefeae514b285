// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `fugu_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FuguConfig {
    pub scaffold: ScaffoldConfig,
    pub neuron: NeuronDefaultsConfig,
    pub logging: LoggingConfig,
}

/// Scaffold behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Verbosity used by `summary` when the caller does not pick one (0-2)
    pub summary_verbosity: u8,
    /// Emit the full summary at debug level once `lay_bricks` completes
    pub log_summary_after_lay: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            summary_verbosity: 1,
            log_summary_after_lay: false,
        }
    }
}

/// Default dynamics handed to bricks for the neurons they create.
///
/// Bricks override any field they care about; these values only fill the gaps.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronDefaultsConfig {
    pub threshold: f64,
    /// Fraction of potential lost per step (0 = none, 1 = full reset)
    pub decay: f64,
    /// Spike release probability
    pub p: f64,
    /// Initial membrane potential
    pub potential: f64,
}

impl Default for NeuronDefaultsConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            decay: 0.0,
            p: 1.0,
            potential: 0.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Base directory for file logs (file-logging feature only)
    pub log_dir: String,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: "./logs".to_string(),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}

/// Log levels accepted by `LoggingConfig::level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
