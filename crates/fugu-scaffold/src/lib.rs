// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
# Fugu Scaffold

Typed assembly of spiking neural circuits from bricks.

- `coding`: the closed set of channel encodings
- `ports`: port/channel schema (`PortSpec`, `ChannelSpec`) and the data that
  flows between bricks (`PortData`, `ChannelData`)
- `brick`: the `Brick` interface
- `scaffold`: registration, connection, `lay_bricks` and `summary`
- `backend`: what a laid scaffold hands to an execution backend

## Example

```ignore
let mut scaffold = Scaffold::new();
let a = scaffold.add_brick(VectorInput::new("A", spikes_a, Coding::Raster)?)?;
let b = scaffold.add_brick(VectorInput::new("B", spikes_b, Coding::Raster)?)?;
let and = scaffold.add_output_brick(LogicGate::and("And")?)?;
scaffold.connect(a, and)?;
scaffold.connect(b, and)?;
scaffold.lay_bricks()?;
let handoff = scaffold.handoff()?;
```
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod backend;
pub mod brick;
pub mod coding;
pub mod ports;
pub mod scaffold;
pub mod types;

pub use backend::{ActivationRecord, Backend, BackendError, Handoff, OutputBrick};
pub use brick::{Brick, BrickOutputs, BrickState, InputSpikes};
pub use coding::{Coding, CodingSet};
pub use ports::{
    compatible, port_map, BrickInputs, ChannelData, ChannelSpec, PortData, PortMap, PortSpec,
    UNBOUNDED,
};
pub use scaffold::{BrickHandle, Connection, Scaffold, ScaffoldState};
pub use types::{BrickError, BrickResult, ScaffoldError, ScaffoldResult};

// Graph types bricks build against
pub use fugu_graph::{GraphBuilder, NeuronGraph, NeuronId, NeuronParams, SynapseParams};
