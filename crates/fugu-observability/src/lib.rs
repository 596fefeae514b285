// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! # fugu-observability
//!
//! Logging infrastructure shared by the Fugu crates.
//!
//! Every crate logs through `tracing` with its own target (for example
//! `target: "fugu-scaffold"`), so per-crate debug flags map directly onto
//! `EnvFilter` directives.
//!
//! ## Features
//! - `file-logging`: timestamped run folders with per-crate rolling log files

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known Fugu log targets for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "fugu-graph",
    "fugu-scaffold",
    "fugu-bricks",
    "fugu-config",
    "fugu-tools",
];
