// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Graph snapshots
//!
//! A snapshot is the persisted form of a finished graph: a JSON document whose
//! neuron records carry `{index, threshold, decay, p, potential}` and whose
//! synapse records carry `{weight, delay}`.
//!
//! ```json
//! {
//!   "version": 1,
//!   "metadata": { "timestamp": 1735689600, "description": "", "source": "scaffold" },
//!   "neurons": [ { "name": "And_0", "brick": "And", "index": 0, "threshold": 1.0, ... } ],
//!   "synapses": [ { "source": "A_0", "target": "And_0", "weight": 0.75, "delay": 1.0 } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

use crate::error::GraphError;
use crate::graph::NeuronGraph;
use crate::ids::NeuronId;
use crate::params::{NeuronParams, SynapseParams};

/// Current snapshot format version (increment when the format changes)
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Snapshot I/O errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: u32,
        expected_version: u32,
    },

    #[error("Snapshot does not describe a valid graph: {0}")]
    Graph(#[from] GraphError),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot metadata (for tracking and debugging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Seconds since the Unix epoch when the snapshot was taken
    pub timestamp: u64,
    pub description: String,
    pub source: String,
}

impl Default for SnapshotMetadata {
    fn default() -> Self {
        Self {
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            description: String::new(),
            source: String::from("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronRecord {
    pub name: NeuronId,
    pub brick: String,
    #[serde(flatten)]
    pub params: NeuronParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseRecord {
    pub source: NeuronId,
    pub target: NeuronId,
    #[serde(flatten)]
    pub params: SynapseParams,
}

/// Complete graph snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    pub metadata: SnapshotMetadata,
    pub neurons: Vec<NeuronRecord>,
    pub synapses: Vec<SynapseRecord>,
}

impl NeuronGraph {
    /// Capture the graph, preserving insertion order of neurons and synapses
    pub fn to_snapshot(&self, metadata: SnapshotMetadata) -> GraphSnapshot {
        GraphSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            metadata,
            neurons: self
                .neurons()
                .map(|neuron| NeuronRecord {
                    name: neuron.id.clone(),
                    brick: neuron.brick.clone(),
                    params: neuron.params,
                })
                .collect(),
            synapses: self
                .synapses()
                .map(|synapse| SynapseRecord {
                    source: synapse.source.clone(),
                    target: synapse.target.clone(),
                    params: *synapse.params,
                })
                .collect(),
        }
    }

    /// Rebuild a graph from a snapshot, re-running every insertion check
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> SnapshotResult<Self> {
        if snapshot.version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                file_version: snapshot.version,
                expected_version: SNAPSHOT_FORMAT_VERSION,
            });
        }
        let mut graph = NeuronGraph::new();
        for record in &snapshot.neurons {
            graph.insert_neuron(record.name.clone(), &record.brick, record.params)?;
        }
        for record in &snapshot.synapses {
            graph.insert_synapse(&record.source, &record.target, record.params)?;
        }
        Ok(graph)
    }
}

/// Write a snapshot as pretty-printed JSON
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &GraphSnapshot, path: P) -> SnapshotResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

/// Read a snapshot, rejecting unsupported format versions
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> SnapshotResult<GraphSnapshot> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: GraphSnapshot = serde_json::from_reader(reader)?;
    if snapshot.version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            file_version: snapshot.version,
            expected_version: SNAPSHOT_FORMAT_VERSION,
        });
    }
    Ok(snapshot)
}
