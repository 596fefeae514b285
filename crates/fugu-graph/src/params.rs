// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Neuron and synapse attribute sets
//!
//! Field names are part of the backend contract and appear verbatim in
//! snapshots.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Per-neuron dynamics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronParams {
    /// Position of the neuron within the brick's output; -1 for control neurons
    pub index: i64,
    pub threshold: f64,
    /// Fraction of membrane potential lost per step
    pub decay: f64,
    /// Spike release probability
    pub p: f64,
    /// Initial membrane potential
    pub potential: f64,
}

impl Default for NeuronParams {
    fn default() -> Self {
        Self {
            index: 0,
            threshold: 0.5,
            decay: 0.0,
            p: 1.0,
            potential: 0.0,
        }
    }
}

impl NeuronParams {
    pub fn with_index(mut self, index: i64) -> Self {
        self.index = index;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    pub fn with_potential(mut self, potential: f64) -> Self {
        self.potential = potential;
        self
    }

    pub fn validate(&self) -> GraphResult<()> {
        require_finite("threshold", self.threshold)?;
        require_finite("potential", self.potential)?;
        require_unit("decay", self.decay)?;
        require_unit("p", self.p)
    }
}

/// Per-synapse parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynapseParams {
    pub weight: f64,
    /// Propagation delay in simulation steps
    pub delay: f64,
}

impl Default for SynapseParams {
    fn default() -> Self {
        Self {
            weight: 1.0,
            delay: 1.0,
        }
    }
}

impl SynapseParams {
    pub fn new(weight: f64, delay: f64) -> Self {
        Self { weight, delay }
    }

    pub fn validate(&self) -> GraphResult<()> {
        require_finite("weight", self.weight)?;
        require_finite("delay", self.delay)?;
        if self.delay < 0.0 {
            return Err(GraphError::InvalidParameter {
                field: "delay",
                value: self.delay,
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> GraphResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GraphError::InvalidParameter {
            field,
            value,
            reason: "must be finite",
        })
    }
}

fn require_unit(field: &'static str, value: f64) -> GraphResult<()> {
    require_finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GraphError::InvalidParameter {
            field,
            value,
            reason: "must lie within [0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(NeuronParams::default().validate().is_ok());
        assert!(SynapseParams::default().validate().is_ok());
    }

    #[test]
    fn test_probability_outside_unit_interval() {
        let err = NeuronParams::default().with_p(1.2).validate().unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { field: "p", .. }));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let err = SynapseParams::new(1.0, -1.0).validate().unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { field: "delay", .. }));
    }

    #[test]
    fn test_nan_weight_rejected() {
        assert!(SynapseParams::new(f64::NAN, 1.0).validate().is_err());
    }
}
