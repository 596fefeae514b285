// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! The neuron graph
//!
//! Storage is a petgraph `DiGraph` plus a name index. Nodes are never removed,
//! so node indices double as stable, dense neuron numbers in insertion order.

use ahash::AHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::ids::NeuronId;
use crate::params::{NeuronParams, SynapseParams};

/// A neuron node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    pub id: NeuronId,
    /// Name of the brick that created the neuron
    pub brick: String,
    pub params: NeuronParams,
}

/// Borrowed view of one synapse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapseView<'a> {
    pub source: &'a NeuronId,
    pub target: &'a NeuronId,
    pub params: &'a SynapseParams,
}

/// Append-only neuron graph
#[derive(Debug, Clone, Default)]
pub struct NeuronGraph {
    graph: DiGraph<Neuron, SynapseParams>,
    index: AHashMap<NeuronId, NodeIndex>,
}

impl NeuronGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_neuron(
        &mut self,
        id: NeuronId,
        brick: &str,
        params: NeuronParams,
    ) -> GraphResult<()> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNeuron(id));
        }
        params.validate()?;
        let node = self.graph.add_node(Neuron {
            id: id.clone(),
            brick: brick.to_string(),
            params,
        });
        self.index.insert(id, node);
        Ok(())
    }

    pub(crate) fn insert_synapse(
        &mut self,
        source: &NeuronId,
        target: &NeuronId,
        params: SynapseParams,
    ) -> GraphResult<()> {
        let src = self.node(source)?;
        let dst = self.node(target)?;
        if self.graph.find_edge(src, dst).is_some() {
            return Err(GraphError::DuplicateSynapse {
                pre: source.clone(),
                post: target.clone(),
            });
        }
        params.validate()?;
        self.graph.add_edge(src, dst, params);
        Ok(())
    }

    fn node(&self, id: &NeuronId) -> GraphResult<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNeuron(id.clone()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn neuron(&self, id: &str) -> Option<&Neuron> {
        self.index.get(id).map(|&node| &self.graph[node])
    }

    /// Dense position of the neuron in insertion order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|node| node.index())
    }

    /// Neuron at a dense position, the inverse of [`position`](Self::position)
    pub fn neuron_at(&self, position: usize) -> Option<&Neuron> {
        self.graph.node_weight(NodeIndex::new(position))
    }

    pub fn synapse(&self, source: &str, target: &str) -> Option<&SynapseParams> {
        let src = *self.index.get(source)?;
        let dst = *self.index.get(target)?;
        self.graph
            .find_edge(src, dst)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    pub fn neuron_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn synapse_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All neurons in insertion order
    pub fn neurons(&self) -> impl Iterator<Item = &Neuron> + '_ {
        self.graph.node_weights()
    }

    /// Neurons created by one brick, in insertion order
    pub fn neurons_of<'a>(&'a self, brick: &'a str) -> impl Iterator<Item = &'a Neuron> + 'a {
        self.neurons().filter(move |neuron| neuron.brick == brick)
    }

    /// All synapses in insertion order
    pub fn synapses(&self) -> impl Iterator<Item = SynapseView<'_>> + '_ {
        self.graph.edge_references().map(move |edge| SynapseView {
            source: &self.graph[edge.source()].id,
            target: &self.graph[edge.target()].id,
            params: edge.weight(),
        })
    }

    /// Synapses terminating on `id`, oldest first
    pub fn incoming(&self, id: &str) -> Vec<SynapseView<'_>> {
        self.edges_of(id, Direction::Incoming)
    }

    /// Synapses leaving `id`, oldest first
    pub fn outgoing(&self, id: &str) -> Vec<SynapseView<'_>> {
        self.edges_of(id, Direction::Outgoing)
    }

    fn edges_of(&self, id: &str, direction: Direction) -> Vec<SynapseView<'_>> {
        let Some(&node) = self.index.get(id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest first
        let mut views: Vec<_> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| {
                (
                    edge.id(),
                    SynapseView {
                        source: &self.graph[edge.source()].id,
                        target: &self.graph[edge.target()].id,
                        params: edge.weight(),
                    },
                )
            })
            .collect();
        views.sort_by_key(|(edge, _)| *edge);
        views.into_iter().map(|(_, view)| view).collect()
    }
}
