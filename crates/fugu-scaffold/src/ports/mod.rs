// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Port/channel schema and the data that flows through it

pub mod data;
pub mod spec;

pub use data::{BrickInputs, ChannelData, PortData};
pub use spec::{compatible, port_map, ChannelSpec, PortMap, PortSpec, UNBOUNDED};
