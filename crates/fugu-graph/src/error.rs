// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Error types for graph construction

use crate::ids::NeuronId;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while appending to the neuron graph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("Neuron {0} already exists")]
    DuplicateNeuron(NeuronId),

    #[error("Neuron {0} does not exist")]
    UnknownNeuron(NeuronId),

    #[error("Brick '{namespace}' cannot add synapses onto neuron {target} it does not own")]
    ForeignTarget { namespace: String, target: NeuronId },

    #[error("Synapse {pre} -> {post} already exists")]
    DuplicateSynapse { pre: NeuronId, post: NeuronId },

    #[error("Invalid parameter {field} = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}
