// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
The brick interface.

A brick declares typed input and output ports and, once, appends its fragment
of the neuron graph through a [`GraphBuilder`] scoped to its own name.
Concrete brick types also expose their schema without an instance through an
associated `schema()` function; the trait methods return the same maps.
*/

use fugu_graph::{GraphBuilder, NeuronId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::coding::CodingSet;
use crate::ports::{BrickInputs, PortData, PortMap};
use crate::types::BrickResult;

/// Output port data returned from a build, keyed by port name
pub type BrickOutputs = BTreeMap<String, PortData>;

/// Lifecycle of a registered brick; the only transition is `Unbuilt -> Built`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickState {
    Unbuilt,
    Built,
}

impl fmt::Display for BrickState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrickState::Unbuilt => write!(f, "unbuilt"),
            BrickState::Built => write!(f, "built"),
        }
    }
}

/// Steps at which an input neuron must be driven by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpikes {
    pub neuron: NeuronId,
    pub steps: Vec<u32>,
}

/// A composable graph-construction rule
pub trait Brick: fmt::Debug {
    /// Scaffold-unique name, also the namespace of the brick's neurons
    fn name(&self) -> &str;

    fn input_ports(&self) -> &PortMap;

    fn output_ports(&self) -> &PortMap;

    /// Codings this brick can emit or accept
    fn supported_codings(&self) -> CodingSet {
        self.input_ports()
            .values()
            .chain(self.output_ports().values())
            .fold(CodingSet::new(), |acc, port| acc.union(&port.codings()))
    }

    /// Append this brick's neurons and synapses and describe its outputs.
    ///
    /// Called at most once per scaffold, after every producer feeding `inputs`
    /// has been built. The returned map must hold one [`PortData`] per declared
    /// output port with every channel's coding resolved.
    fn build(&mut self, graph: &mut GraphBuilder<'_>, inputs: &BrickInputs) -> BrickResult<BrickOutputs>;

    /// Spike schedule for neurons that the backend drives directly.
    ///
    /// Only meaningful after a successful build; bricks without external
    /// stimulus keep the default.
    fn input_spikes(&self) -> Vec<InputSpikes> {
        Vec::new()
    }
}
