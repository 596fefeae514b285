// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Neuron identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque neuron identifier, unique within one graph.
///
/// Identifiers handed out by a [`GraphBuilder`](crate::GraphBuilder) have the
/// form `"{brick_name}_{local_tag}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeuronId(String);

impl NeuronId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Namespaced identifier for a neuron created by `brick`
    pub fn namespaced(brick: &str, tag: impl fmt::Display) -> Self {
        Self(format!("{}_{}", brick, tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NeuronId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NeuronId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NeuronId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_format() {
        assert_eq!(NeuronId::namespaced("And", 3).as_str(), "And_3");
        assert_eq!(NeuronId::namespaced("Input", "complete").to_string(), "Input_complete");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = NeuronId::from("Input_0");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Input_0\"");
    }
}
