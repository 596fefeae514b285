// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Boundary between a laid scaffold and an execution backend.

The scaffold hands over a [`Handoff`]: the finished neuron graph, the output
ports of bricks registered as outputs, and the spike schedules of input
bricks. Backends compile it into their own artifact and run that artifact for
a number of steps, reporting which neurons fired on each step.
*/

use fugu_graph::{GraphSnapshot, NeuronGraph, NeuronId, SnapshotMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::brick::InputSpikes;
use crate::ports::PortData;

/// Output ports of one output-designated brick
#[derive(Debug, Clone, Copy)]
pub struct OutputBrick<'a> {
    pub name: &'a str,
    pub ports: &'a BTreeMap<String, Arc<PortData>>,
}

/// Everything a backend needs from a laid scaffold
#[derive(Debug, Clone)]
pub struct Handoff<'a> {
    pub graph: &'a NeuronGraph,
    pub outputs: Vec<OutputBrick<'a>>,
    pub input_spikes: Vec<InputSpikes>,
}

impl<'a> Handoff<'a> {
    pub fn output(&self, brick: &str) -> Option<&OutputBrick<'a>> {
        self.outputs.iter().find(|output| output.name == brick)
    }

    /// Persistable copy of the graph
    pub fn snapshot(&self, metadata: SnapshotMetadata) -> GraphSnapshot {
        self.graph.to_snapshot(metadata)
    }
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Execution failed: {0}")]
    Run(String),

    #[error("Unsupported by this backend: {0}")]
    Unsupported(String),
}

/// Neurons that fired on each simulation step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRecord {
    steps: Vec<Vec<NeuronId>>,
}

impl ActivationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the neurons that fired on the next step
    pub fn push_step(&mut self, fired: Vec<NeuronId>) {
        self.steps.push(fired);
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn fired_at(&self, step: usize) -> &[NeuronId] {
        self.steps.get(step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Earliest step on which `neuron` fired
    pub fn first_spike(&self, neuron: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|fired| fired.iter().any(|id| id.as_str() == neuron))
    }

    pub fn spike_count(&self, neuron: &str) -> usize {
        self.steps
            .iter()
            .flatten()
            .filter(|id| id.as_str() == neuron)
            .count()
    }

    pub fn steps(&self) -> impl Iterator<Item = &[NeuronId]> + '_ {
        self.steps.iter().map(Vec::as_slice)
    }
}

/// An execution engine for laid scaffolds
pub trait Backend {
    type Options;
    type Artifact;

    fn compile(&mut self, handoff: &Handoff<'_>, options: &Self::Options) -> Result<Self::Artifact, BackendError>;

    fn run(&mut self, artifact: &Self::Artifact, steps: u32) -> Result<ActivationRecord, BackendError>;
}
