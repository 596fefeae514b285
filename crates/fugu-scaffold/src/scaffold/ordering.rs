// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Brick dependency DAG and deterministic build ordering

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Dependencies between bricks; node `i` is the brick registered `i`-th
pub(crate) struct DependencyGraph {
    graph: DiGraph<(), ()>,
}

impl DependencyGraph {
    /// `edges` are `(producer, consumer)` registration indices, parallel edges allowed
    pub(crate) fn new(brick_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut graph = DiGraph::with_capacity(brick_count, 0);
        for _ in 0..brick_count {
            graph.add_node(());
        }
        for (producer, consumer) in edges {
            graph.add_edge(NodeIndex::new(producer), NodeIndex::new(consumer), ());
        }
        Self { graph }
    }

    /// Bricks on any cycle, ascending; self-loops count
    pub(crate) fn cyclic_members(&self) -> Vec<usize> {
        let mut members: Vec<usize> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .flatten()
            .map(|node| node.index())
            .collect();
        members.sort_unstable();
        members
    }

    /// Topological order with ties broken by registration order.
    ///
    /// `Err` carries the bricks on cycles when no order exists.
    pub(crate) fn schedule(&self) -> Result<Vec<usize>, Vec<usize>> {
        let cyclic = self.cyclic_members();
        if !cyclic.is_empty() {
            return Err(cyclic);
        }

        let mut pending: Vec<usize> = self
            .graph
            .node_indices()
            .map(|node| self.graph.edges_directed(node, Direction::Incoming).count())
            .collect();
        let mut ready: BinaryHeap<Reverse<usize>> = pending
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(index, _)| Reverse(index))
            .collect();

        let mut order = Vec::with_capacity(pending.len());
        while let Some(Reverse(index)) = ready.pop() {
            order.push(index);
            for edge in self.graph.edges(NodeIndex::new(index)) {
                let consumer = edge.target().index();
                pending[consumer] -= 1;
                if pending[consumer] == 0 {
                    ready.push(Reverse(consumer));
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_bricks_keep_registration_order() {
        let deps = DependencyGraph::new(4, []);
        assert_eq!(deps.schedule().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_consumer_registered_first() {
        // 0 consumes from 2 and 1; 3 is independent
        let deps = DependencyGraph::new(4, [(2, 0), (1, 0)]);
        assert_eq!(deps.schedule().unwrap(), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_parallel_edges() {
        let deps = DependencyGraph::new(2, [(0, 1), (0, 1)]);
        assert_eq!(deps.schedule().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_cycles_reported() {
        let deps = DependencyGraph::new(4, [(0, 1), (1, 2), (2, 1), (3, 3)]);
        assert_eq!(deps.schedule().unwrap_err(), vec![1, 2, 3]);
        assert!(DependencyGraph::new(2, [(0, 1)]).cyclic_members().is_empty());
    }
}
