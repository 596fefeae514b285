// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
The scaffold: brick registry, connection relation and the neuron graph.

```text
add_brick / connect      (Open)
        │
        ▼
   lay_bricks ──ok──▶ Laid   ──▶ handoff() to a backend
        │
        └──err──▶ Failed (poisoned, rebuild from scratch)
```
*/

mod lay;
mod ordering;
mod summary;

use ahash::AHashMap;
use fugu_config::{FuguConfig, ScaffoldConfig};
use fugu_graph::{BuildDefaults, NeuronGraph, NeuronParams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::backend::{Handoff, OutputBrick};
use crate::brick::{Brick, BrickState};
use crate::ports::{PortData, PortMap};
use crate::types::{ScaffoldError, ScaffoldResult};

/// Handle to a registered brick, valid only for the scaffold that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickHandle(usize);

impl BrickHandle {
    /// Registration position
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BrickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One declared producer-port to consumer-port binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub producer: BrickHandle,
    pub producer_port: String,
    pub consumer: BrickHandle,
    pub consumer_port: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaffoldState {
    /// Accepting bricks and connections
    Open,
    /// Graph complete and read-only
    Laid,
    /// A lay pass failed; the scaffold cannot be reused
    Failed,
}

impl fmt::Display for ScaffoldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldState::Open => write!(f, "open"),
            ScaffoldState::Laid => write!(f, "laid"),
            ScaffoldState::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug)]
struct RegisteredBrick {
    brick: Box<dyn Brick>,
    state: BrickState,
    output: bool,
    outputs: BTreeMap<String, Arc<PortData>>,
}

impl RegisteredBrick {
    fn name(&self) -> &str {
        self.brick.name()
    }
}

/// Owns bricks, their connections and the neuron graph they build
#[derive(Debug)]
pub struct Scaffold {
    bricks: Vec<RegisteredBrick>,
    names: AHashMap<String, BrickHandle>,
    connections: Vec<Connection>,
    graph: NeuronGraph,
    state: ScaffoldState,
    defaults: BuildDefaults,
    config: ScaffoldConfig,
    build_order: Vec<BrickHandle>,
}

impl Default for Scaffold {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaffold {
    pub fn new() -> Self {
        Self {
            bricks: Vec::new(),
            names: AHashMap::new(),
            connections: Vec::new(),
            graph: NeuronGraph::new(),
            state: ScaffoldState::Open,
            defaults: BuildDefaults::default(),
            config: ScaffoldConfig::default(),
            build_order: Vec::new(),
        }
    }

    /// Scaffold whose bricks see the configured default neuron parameters
    pub fn with_config(config: &FuguConfig) -> Self {
        let defaults = BuildDefaults {
            neuron: NeuronParams {
                index: 0,
                threshold: config.neuron.threshold,
                decay: config.neuron.decay,
                p: config.neuron.p,
                potential: config.neuron.potential,
            },
        };
        Self {
            defaults,
            config: config.scaffold.clone(),
            ..Self::new()
        }
    }

    pub fn add_brick<B: Brick + 'static>(&mut self, brick: B) -> ScaffoldResult<BrickHandle> {
        self.add_boxed_brick(Box::new(brick), false)
    }

    /// Register a brick whose output ports are handed to the backend for result interpretation
    pub fn add_output_brick<B: Brick + 'static>(&mut self, brick: B) -> ScaffoldResult<BrickHandle> {
        self.add_boxed_brick(Box::new(brick), true)
    }

    pub fn add_boxed_brick(&mut self, brick: Box<dyn Brick>, output: bool) -> ScaffoldResult<BrickHandle> {
        self.ensure_open()?;
        let name = brick.name().to_string();
        if name.is_empty() {
            return Err(ScaffoldError::InvalidSpec(
                "brick name must not be empty".to_string(),
            ));
        }
        if self.names.contains_key(&name) {
            return Err(ScaffoldError::DuplicateName(name));
        }
        check_port_keys(&name, brick.input_ports())?;
        check_port_keys(&name, brick.output_ports())?;

        let handle = BrickHandle(self.bricks.len());
        self.bricks.push(RegisteredBrick {
            brick,
            state: BrickState::Unbuilt,
            output,
            outputs: BTreeMap::new(),
        });
        self.names.insert(name.clone(), handle);
        debug!(target: "fugu-scaffold", "Registered brick '{}' as {}{}", name, handle, if output { " (output)" } else { "" });
        Ok(handle)
    }

    /// Connect using the producer's only output port and the consumer's only input port
    pub fn connect(&mut self, producer: BrickHandle, consumer: BrickHandle) -> ScaffoldResult<()> {
        self.connect_ports(producer, None, consumer, None)
    }

    /// Connect named ports; `None` selects the brick's only port on that side.
    ///
    /// Compatibility is checked now, so a bad connection never reaches `lay_bricks`.
    /// A producer port may feed a given consumer once.
    pub fn connect_ports(
        &mut self,
        producer: BrickHandle,
        producer_port: Option<&str>,
        consumer: BrickHandle,
        consumer_port: Option<&str>,
    ) -> ScaffoldResult<()> {
        self.ensure_open()?;
        let producer_brick = self.registered(producer)?;
        let consumer_brick = self.registered(consumer)?;

        let mismatch = |reason: String| ScaffoldError::PortMismatch {
            producer: producer_brick.name().to_string(),
            producer_port: producer_port.unwrap_or("<default>").to_string(),
            consumer: consumer_brick.name().to_string(),
            consumer_port: consumer_port.unwrap_or("<default>").to_string(),
            reason,
        };

        let out_name = resolve_port(producer_brick.brick.output_ports(), producer_port, "output")
            .map_err(&mismatch)?;
        let in_name = resolve_port(consumer_brick.brick.input_ports(), consumer_port, "input")
            .map_err(&mismatch)?;

        let produced = &producer_brick.brick.output_ports()[&out_name];
        let accepted = &consumer_brick.brick.input_ports()[&in_name];
        produced.check_feeds(accepted).map_err(|reason| ScaffoldError::PortMismatch {
            producer: producer_brick.name().to_string(),
            producer_port: out_name.clone(),
            consumer: consumer_brick.name().to_string(),
            consumer_port: in_name.clone(),
            reason,
        })?;
        // the graph holds no parallel synapses
        if self.connections.iter().any(|connection| {
            connection.producer == producer && connection.producer_port == out_name && connection.consumer == consumer
        }) {
            return Err(ScaffoldError::PortMismatch {
                producer: producer_brick.name().to_string(),
                producer_port: out_name,
                consumer: consumer_brick.name().to_string(),
                consumer_port: in_name,
                reason: "producer port already feeds this brick".to_string(),
            });
        }

        debug!(
            target: "fugu-scaffold",
            "Connected {}.{} -> {}.{}",
            producer_brick.name(),
            out_name,
            consumer_brick.name(),
            in_name
        );
        self.connections.push(Connection {
            producer,
            producer_port: out_name,
            consumer,
            consumer_port: in_name,
        });
        Ok(())
    }

    /// Hand the finished graph to a backend
    pub fn handoff(&self) -> ScaffoldResult<Handoff<'_>> {
        match self.state {
            ScaffoldState::Laid => {}
            ScaffoldState::Open => return Err(ScaffoldError::NotLaid),
            ScaffoldState::Failed => return Err(ScaffoldError::Poisoned),
        }
        let outputs = self
            .bricks
            .iter()
            .filter(|slot| slot.output)
            .map(|slot| OutputBrick {
                name: slot.name(),
                ports: &slot.outputs,
            })
            .collect();
        let input_spikes = self
            .bricks
            .iter()
            .flat_map(|slot| slot.brick.input_spikes())
            .collect();
        Ok(Handoff {
            graph: &self.graph,
            outputs,
            input_spikes,
        })
    }

    /// The neuron graph; empty until laid, final afterwards
    pub fn graph(&self) -> &NeuronGraph {
        &self.graph
    }

    pub fn state(&self) -> ScaffoldState {
        self.state
    }

    pub fn brick_count(&self) -> usize {
        self.bricks.len()
    }

    pub fn brick(&self, handle: BrickHandle) -> ScaffoldResult<&dyn Brick> {
        Ok(self.registered(handle)?.brick.as_ref())
    }

    pub fn handle_of(&self, name: &str) -> Option<BrickHandle> {
        self.names.get(name).copied()
    }

    pub fn brick_state(&self, handle: BrickHandle) -> ScaffoldResult<BrickState> {
        Ok(self.registered(handle)?.state)
    }

    pub fn is_built(&self, handle: BrickHandle) -> ScaffoldResult<bool> {
        Ok(self.brick_state(handle)? == BrickState::Built)
    }

    /// Output port data of a built brick
    pub fn outputs_of(&self, handle: BrickHandle) -> ScaffoldResult<&BTreeMap<String, Arc<PortData>>> {
        Ok(&self.registered(handle)?.outputs)
    }

    pub fn output_bricks(&self) -> Vec<BrickHandle> {
        self.bricks
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.output)
            .map(|(index, _)| BrickHandle(index))
            .collect()
    }

    /// Connections in declaration order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Bricks in the order `lay_bricks` built them
    pub fn build_order(&self) -> &[BrickHandle] {
        &self.build_order
    }

    fn registered(&self, handle: BrickHandle) -> ScaffoldResult<&RegisteredBrick> {
        self.bricks
            .get(handle.0)
            .ok_or(ScaffoldError::UnknownBrick(handle.0))
    }

    fn ensure_open(&self) -> ScaffoldResult<()> {
        match self.state {
            ScaffoldState::Open => Ok(()),
            ScaffoldState::Laid => Err(ScaffoldError::AlreadyLaid),
            ScaffoldState::Failed => Err(ScaffoldError::Poisoned),
        }
    }
}

fn check_port_keys(brick: &str, ports: &PortMap) -> ScaffoldResult<()> {
    for (key, spec) in ports {
        if key != spec.name() {
            return Err(ScaffoldError::InvalidSpec(format!(
                "brick '{}' lists port '{}' under key '{}'",
                brick,
                spec.name(),
                key
            )));
        }
    }
    Ok(())
}

fn resolve_port(ports: &PortMap, requested: Option<&str>, side: &str) -> Result<String, String> {
    if let Some(name) = requested {
        return if ports.contains_key(name) {
            Ok(name.to_string())
        } else {
            Err(format!("no {} port named '{}'", side, name))
        };
    }
    let mut names = ports.keys();
    match (names.next(), names.next()) {
        (Some(only), None) => Ok(only.clone()),
        (None, _) => Err(format!("brick declares no {} ports", side)),
        _ => Err(format!(
            "{} port is ambiguous, name one of: {}",
            side,
            ports.keys().cloned().collect::<Vec<_>>().join(", ")
        )),
    }
}
