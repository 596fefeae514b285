// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Error and result types for scaffold operations.

Registration and connection errors surface from `add_brick`/`connect`; every
other variant surfaces from `lay_bricks` and is fatal to the pass.
*/

use fugu_graph::GraphError;

use crate::coding::{Coding, CodingSet};

/// Result type for scaffold operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Result type returned by a brick's build operation
pub type BrickResult<T> = Result<T, BrickError>;

/// Errors that can occur while assembling a scaffold
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("Invalid spec: {0}")]
    InvalidSpec(String),

    #[error("A brick named '{0}' is already registered")]
    DuplicateName(String),

    #[error("Cannot connect {producer}.{producer_port} -> {consumer}.{consumer_port}: {reason}")]
    PortMismatch {
        producer: String,
        producer_port: String,
        consumer: String,
        consumer_port: String,
        reason: String,
    },

    #[error("Port {brick}.{port} is bound {connections} time(s), allowed range is {minimum}..={maximum}")]
    PortCardinality {
        brick: String,
        port: String,
        connections: usize,
        minimum: usize,
        maximum: usize,
    },

    #[error("Required port {brick}.{port} has no connections (minimum {minimum})")]
    UnsatisfiedPort {
        brick: String,
        port: String,
        minimum: usize,
    },

    #[error("Connections form a cycle through: {}", .bricks.join(", "))]
    CyclicGraph { bricks: Vec<String> },

    #[error("Channel {brick}.{port}.{channel} carries coding {found}, allowed: {allowed}")]
    CodingMismatch {
        brick: String,
        port: String,
        channel: String,
        found: String,
        allowed: CodingSet,
    },

    #[error("Brick '{brick}' failed to build: {source}")]
    Build {
        brick: String,
        #[source]
        source: BrickError,
    },

    #[error("Unknown brick handle #{0}")]
    UnknownBrick(usize),

    #[error("Scaffold has already been laid")]
    AlreadyLaid,

    #[error("Scaffold has not been laid yet")]
    NotLaid,

    #[error("A previous lay_bricks pass failed; construct a fresh scaffold")]
    Poisoned,
}

impl ScaffoldError {
    pub(crate) fn coding_mismatch(
        brick: &str,
        port: &str,
        channel: &str,
        found: Option<Coding>,
        allowed: &CodingSet,
    ) -> Self {
        ScaffoldError::CodingMismatch {
            brick: brick.to_string(),
            port: port.to_string(),
            channel: channel.to_string(),
            found: found.map_or_else(|| "unresolved".to_string(), |c| c.to_string()),
            allowed: allowed.clone(),
        }
    }

    pub(crate) fn build(brick: &str, reason: impl Into<String>) -> Self {
        ScaffoldError::Build {
            brick: brick.to_string(),
            source: BrickError::Contract(reason.into()),
        }
    }
}

/// Errors a brick raises from its build operation
#[derive(Debug, thiserror::Error)]
pub enum BrickError {
    /// Brick-specific contract violation, e.g. "expected exactly two inputs"
    #[error("{0}")]
    Contract(String),

    #[error("port '{0}' is not declared")]
    UnknownPort(String),

    #[error("port '{port}' has no channel '{channel}'")]
    UnknownChannel { port: String, channel: String },

    #[error("channel {port}.{channel} cannot carry coding {found}; allowed: {allowed}")]
    CodingMismatch {
        port: String,
        channel: String,
        found: Coding,
        allowed: CodingSet,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl BrickError {
    /// Attach the identity of the failing brick
    pub(crate) fn into_scaffold_error(self, brick: &str) -> ScaffoldError {
        match self {
            BrickError::CodingMismatch {
                port,
                channel,
                found,
                allowed,
            } => ScaffoldError::coding_mismatch(brick, &port, &channel, Some(found), &allowed),
            other => ScaffoldError::Build {
                brick: brick.to_string(),
                source: other,
            },
        }
    }
}
