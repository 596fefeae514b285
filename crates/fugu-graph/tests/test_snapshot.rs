// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Snapshot persistence tests

use fugu_graph::{
    load_snapshot, save_snapshot, BuildDefaults, GraphBuilder, NeuronGraph, NeuronParams,
    SnapshotError, SnapshotMetadata, SynapseParams,
};
use tempfile::tempdir;

fn two_brick_graph() -> NeuronGraph {
    let mut graph = NeuronGraph::new();
    let inputs = {
        let mut builder = GraphBuilder::new(&mut graph, "Input", BuildDefaults::default());
        let a = builder.add_neuron(0, NeuronParams::default()).unwrap();
        let b = builder
            .add_neuron("complete", NeuronParams::default().with_index(-1))
            .unwrap();
        (a, b)
    };
    let mut builder = GraphBuilder::new(&mut graph, "Relay", BuildDefaults::default());
    let out = builder
        .add_neuron(0, NeuronParams::default().with_threshold(1.0).with_decay(1.0))
        .unwrap();
    builder
        .add_synapse(&inputs.0, &out, SynapseParams::new(0.75, 1.0))
        .unwrap();
    builder
        .add_synapse(&inputs.1, &out, SynapseParams::new(1.0, 2.0))
        .unwrap();
    graph
}

#[test]
fn test_snapshot_uses_backend_attribute_names() {
    let graph = two_brick_graph();
    let snapshot = graph.to_snapshot(SnapshotMetadata::default());
    let json = serde_json::to_value(&snapshot).unwrap();

    let neuron = &json["neurons"][2];
    assert_eq!(neuron["name"], "Relay_0");
    for key in ["index", "threshold", "decay", "p", "potential"] {
        assert!(neuron.get(key).is_some(), "missing neuron attribute {}", key);
    }
    let synapse = &json["synapses"][0];
    assert_eq!(synapse["weight"], 0.75);
    assert_eq!(synapse["delay"], 1.0);
}

#[test]
fn test_save_and_load_restores_graph() {
    let graph = two_brick_graph();
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");

    let snapshot = graph.to_snapshot(SnapshotMetadata {
        description: "relay".to_string(),
        ..SnapshotMetadata::default()
    });
    save_snapshot(&snapshot, &path).unwrap();

    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded, snapshot);

    let restored = NeuronGraph::from_snapshot(&loaded).unwrap();
    assert_eq!(restored.neuron_count(), 3);
    assert_eq!(restored.synapse_count(), 2);
    assert_eq!(restored.neuron("Input_complete").unwrap().params.index, -1);
    assert_eq!(restored.synapse("Input_complete", "Relay_0").unwrap().delay, 2.0);
}

#[test]
fn test_unsupported_version_rejected() {
    let graph = two_brick_graph();
    let mut snapshot = graph.to_snapshot(SnapshotMetadata::default());
    snapshot.version = 99;

    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    save_snapshot(&snapshot, &path).unwrap();

    assert!(matches!(
        load_snapshot(&path),
        Err(SnapshotError::VersionMismatch { file_version: 99, .. })
    ));
    assert!(NeuronGraph::from_snapshot(&snapshot).is_err());
}

#[test]
fn test_snapshot_with_dangling_synapse_rejected() {
    let graph = two_brick_graph();
    let mut snapshot = graph.to_snapshot(SnapshotMetadata::default());
    snapshot.synapses[0].source = "Nowhere_0".into();

    assert!(matches!(
        NeuronGraph::from_snapshot(&snapshot),
        Err(SnapshotError::Graph(_))
    ));
}
