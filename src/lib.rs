// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! # Fugu - composable spiking neural graphs
//!
//! Fugu assembles spiking neural networks from reusable *bricks*. Each brick
//! declares typed ports; a [`Scaffold`](scaffold::Scaffold) checks the
//! connections between them, builds every brick exactly once in dependency
//! order, and hands the finished neuron graph to an execution backend.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! fugu = "0.1"  # Default: bricks + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`bricks`** (default): concrete bricks (`VectorInput`, `LogicGate`)
//! - **`observability`** (default): logging initialization and debug flags
//! - **`file-logging`**: rolling per-run log files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fugu::prelude::*;
//!
//! let mut scaffold = Scaffold::new();
//! let a = scaffold.add_brick(VectorInput::from_spike_times("A", &[0, 1, 2], Coding::Raster)?)?;
//! let b = scaffold.add_brick(VectorInput::from_spike_times("B", &[0, 2, 2], Coding::Raster)?)?;
//! let and = scaffold.add_output_brick(LogicGate::and("And")?)?;
//! scaffold.connect(a, and)?;
//! scaffold.connect(b, and)?;
//! scaffold.lay_bricks()?;
//!
//! println!("{}", scaffold.summary(2));
//! let handoff = scaffold.handoff()?;
//! assert_eq!(handoff.outputs.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use fugu_config as config;
pub use fugu_graph as graph;

// Re-export assembly layer
pub use fugu_scaffold as scaffold;

#[cfg(feature = "bricks")]
pub use fugu_bricks as bricks;

#[cfg(feature = "observability")]
pub use fugu_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{load_config, FuguConfig};
    pub use crate::graph::{
        load_snapshot, save_snapshot, GraphSnapshot, NeuronGraph, NeuronId, NeuronParams,
        SnapshotMetadata, SynapseParams,
    };
    pub use crate::scaffold::{
        ActivationRecord, Backend, BackendError, Brick, BrickError, BrickHandle, BrickInputs,
        BrickOutputs, BrickResult, ChannelSpec, Coding, CodingSet, GraphBuilder, Handoff,
        PortData, PortMap, PortSpec, Scaffold, ScaffoldError, ScaffoldResult,
    };

    #[cfg(feature = "bricks")]
    pub use crate::bricks::{GateKind, LogicGate, VectorInput};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_console_logging, parse_debug_flags, CrateDebugFlags};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let scaffold = Scaffold::new();
        assert_eq!(scaffold.brick_count(), 0);
        assert_eq!(NeuronId::namespaced("And", 0).as_str(), "And_0");
    }
}
