// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
# Fugu Bricks

Concrete bricks for Fugu scaffolds.

- [`VectorInput`]: presents a spike raster as a `data` channel plus a
  `complete` signal
- [`LogicGate`]: element-wise AND / OR over exactly two operands

Every brick here speaks the same port shape: a `data` channel and a
`complete` channel carrying a single [`Coding::Spike`] neuron.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod input;
pub mod logic;

pub use input::{input_codings, VectorInput};
pub use logic::{gate_codings, GateKind, LogicGate};

use fugu_scaffold::{ChannelSpec, Coding, CodingSet, PortSpec, ScaffoldResult};

pub const INPUT: &str = "input";
pub const OUTPUT: &str = "output";
pub const DATA: &str = "data";
pub const COMPLETE: &str = "complete";

/// Port with a `data` channel in `data` codings and a `complete` spike channel
pub fn signal_port(name: &str, minimum: usize, maximum: usize, data: CodingSet) -> ScaffoldResult<PortSpec> {
    PortSpec::declare(
        name,
        minimum,
        maximum,
        [
            ChannelSpec::new(DATA, data)?,
            ChannelSpec::new(COMPLETE, [Coding::Spike])?.with_len(Some(1), Some(1))?,
        ],
    )
}
