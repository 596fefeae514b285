// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
# Fugu Neuron Graph

The structure every brick contributes to and every backend consumes:

- Nodes are neurons carrying `{index, threshold, decay, p, potential}`
- Edges are synapses carrying `{weight, delay}`

The graph is append-only. Bricks never receive the graph itself; they get a
[`GraphBuilder`] bound to their own namespace which can add neurons, and add
synapses that terminate on neurons the same builder created. Nothing can be
removed or rewritten once added.

Snapshots ([`GraphSnapshot`]) persist a finished graph as JSON with the
attribute names above, so any backend can pick it up without linking Fugu.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builder;
pub mod error;
pub mod graph;
pub mod ids;
pub mod params;
pub mod snapshot;

pub use builder::{BuildDefaults, GraphBuilder};
pub use error::{GraphError, GraphResult};
pub use graph::{Neuron, NeuronGraph, SynapseView};
pub use ids::NeuronId;
pub use params::{NeuronParams, SynapseParams};
pub use snapshot::{
    load_snapshot, save_snapshot, GraphSnapshot, NeuronRecord, SnapshotError, SnapshotMetadata,
    SnapshotResult, SynapseRecord, SNAPSHOT_FORMAT_VERSION,
};
