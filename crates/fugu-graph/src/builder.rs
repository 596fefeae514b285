// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Scoped, append-only access to the neuron graph for one brick

use ahash::AHashSet;
use std::fmt;
use tracing::trace;

use crate::error::{GraphError, GraphResult};
use crate::graph::NeuronGraph;
use crate::ids::NeuronId;
use crate::params::{NeuronParams, SynapseParams};

/// Default parameters offered to bricks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildDefaults {
    pub neuron: NeuronParams,
}

/// Append-only handle given to a brick for the duration of its build.
///
/// Every neuron gets the identifier `"{namespace}_{tag}"`. Synapses may start
/// anywhere in the graph but must end on a neuron this builder created, so a
/// brick can never alter the inputs of another brick's neurons.
pub struct GraphBuilder<'g> {
    graph: &'g mut NeuronGraph,
    namespace: String,
    defaults: BuildDefaults,
    owned: AHashSet<NeuronId>,
    synapses_added: usize,
}

impl<'g> GraphBuilder<'g> {
    pub fn new(graph: &'g mut NeuronGraph, namespace: impl Into<String>, defaults: BuildDefaults) -> Self {
        Self {
            graph,
            namespace: namespace.into(),
            defaults,
            owned: AHashSet::new(),
            synapses_added: 0,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Identifier a neuron with this tag receives
    pub fn neuron_id(&self, tag: impl fmt::Display) -> NeuronId {
        NeuronId::namespaced(&self.namespace, tag)
    }

    /// Configured default neuron parameters
    pub fn default_neuron(&self) -> NeuronParams {
        self.defaults.neuron
    }

    pub fn add_neuron(&mut self, tag: impl fmt::Display, params: NeuronParams) -> GraphResult<NeuronId> {
        let id = self.neuron_id(tag);
        self.graph.insert_neuron(id.clone(), &self.namespace, params)?;
        trace!(target: "fugu-graph", "{}: neuron {} {:?}", self.namespace, id, params);
        self.owned.insert(id.clone());
        Ok(id)
    }

    pub fn add_synapse(
        &mut self,
        source: &NeuronId,
        target: &NeuronId,
        params: SynapseParams,
    ) -> GraphResult<()> {
        if !self.owned.contains(target) {
            if !self.graph.contains(target.as_str()) {
                return Err(GraphError::UnknownNeuron(target.clone()));
            }
            return Err(GraphError::ForeignTarget {
                namespace: self.namespace.clone(),
                target: target.clone(),
            });
        }
        self.graph.insert_synapse(source, target, params)?;
        trace!(target: "fugu-graph", "{}: synapse {} -> {} {:?}", self.namespace, source, target, params);
        self.synapses_added += 1;
        Ok(())
    }

    /// Whether `id` exists anywhere in the graph
    pub fn contains(&self, id: &NeuronId) -> bool {
        self.graph.contains(id.as_str())
    }

    pub fn neurons_added(&self) -> usize {
        self.owned.len()
    }

    pub fn synapses_added(&self) -> usize {
        self.synapses_added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespacing() {
        let mut graph = NeuronGraph::new();
        let mut builder = GraphBuilder::new(&mut graph, "Gate", BuildDefaults::default());
        let id = builder.add_neuron(0, builder.default_neuron()).unwrap();
        assert_eq!(id.as_str(), "Gate_0");
        assert_eq!(builder.neurons_added(), 1);
        assert_eq!(graph.neuron("Gate_0").unwrap().brick, "Gate");
    }

    #[test]
    fn test_synapse_onto_foreign_neuron_rejected() {
        let mut graph = NeuronGraph::new();
        let upstream = {
            let mut builder = GraphBuilder::new(&mut graph, "Input", BuildDefaults::default());
            builder.add_neuron(0, NeuronParams::default()).unwrap()
        };

        let mut builder = GraphBuilder::new(&mut graph, "Gate", BuildDefaults::default());
        let own = builder.add_neuron(0, NeuronParams::default()).unwrap();

        // inbound from another brick is fine
        builder
            .add_synapse(&upstream, &own, SynapseParams::new(0.75, 1.0))
            .unwrap();

        let err = builder
            .add_synapse(&own, &upstream, SynapseParams::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::ForeignTarget { .. }));
        assert_eq!(builder.synapses_added(), 1);
        assert_eq!(graph.synapse_count(), 1);
    }

    #[test]
    fn test_unknown_endpoints() {
        let mut graph = NeuronGraph::new();
        let mut builder = GraphBuilder::new(&mut graph, "Gate", BuildDefaults::default());
        let own = builder.add_neuron("out", NeuronParams::default()).unwrap();

        let ghost = NeuronId::from("Ghost_0");
        assert_eq!(
            builder.add_synapse(&ghost, &own, SynapseParams::default()),
            Err(GraphError::UnknownNeuron(ghost.clone()))
        );
        assert_eq!(
            builder.add_synapse(&own, &ghost, SynapseParams::default()),
            Err(GraphError::UnknownNeuron(ghost))
        );
    }

    #[test]
    fn test_invalid_params_leave_graph_untouched() {
        let mut graph = NeuronGraph::new();
        let mut builder = GraphBuilder::new(&mut graph, "Gate", BuildDefaults::default());
        assert!(builder
            .add_neuron(0, NeuronParams::default().with_decay(2.0))
            .is_err());
        assert_eq!(builder.neurons_added(), 0);
        assert!(graph.is_empty());
    }
}
