// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures configuration values are finite, within valid ranges, and that
//! enumerated fields hold a known value. All problems are collected and
//! reported together.

use crate::{ConfigError, ConfigResult, FuguConfig, LOG_LEVELS};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    NotFinite { field: String },
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{} = {} is outside valid range ({}-{})",
                field, value, min, max
            ),
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Finite neuron parameters
/// - Probability and decay within [0, 1]
/// - Known log level and summary verbosity
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &FuguConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_finite_values(config, &mut errors);
    validate_value_ranges(config, &mut errors);
    validate_enumerations(config, &mut errors);

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

fn validate_finite_values(config: &FuguConfig, errors: &mut Vec<ConfigValidationError>) {
    let values = [
        ("neuron.threshold", config.neuron.threshold),
        ("neuron.decay", config.neuron.decay),
        ("neuron.p", config.neuron.p),
        ("neuron.potential", config.neuron.potential),
    ];
    for (field, value) in values {
        if !value.is_finite() {
            errors.push(ConfigValidationError::NotFinite {
                field: field.to_string(),
            });
        }
    }
}

fn validate_value_ranges(config: &FuguConfig, errors: &mut Vec<ConfigValidationError>) {
    let unit_values = [("neuron.p", config.neuron.p), ("neuron.decay", config.neuron.decay)];
    for (field, value) in unit_values {
        if value.is_finite() && !(0.0..=1.0).contains(&value) {
            errors.push(ConfigValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min: 0.0,
                max: 1.0,
            });
        }
    }

    if config.scaffold.summary_verbosity > 2 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "scaffold.summary_verbosity".to_string(),
            value: config.scaffold.summary_verbosity as f64,
            min: 0.0,
            max: 2.0,
        });
    }
}

fn validate_enumerations(config: &FuguConfig, errors: &mut Vec<ConfigValidationError>) {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
}
