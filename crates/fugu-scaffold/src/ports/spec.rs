// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Declarative port and channel schema

use std::collections::BTreeMap;
use std::fmt;

use crate::coding::CodingSet;
use crate::types::{ScaffoldError, ScaffoldResult};

/// Ports of one brick keyed by port name
pub type PortMap = BTreeMap<String, PortSpec>;

/// Marker for a port without an upper bound on connections
pub const UNBOUNDED: usize = usize::MAX;

/// Schema of one channel within a port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    name: String,
    codings: CodingSet,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl ChannelSpec {
    pub fn new(name: impl Into<String>, codings: impl Into<CodingSet>) -> ScaffoldResult<Self> {
        let name = name.into();
        let codings = codings.into();
        if name.is_empty() {
            return Err(ScaffoldError::InvalidSpec(
                "channel name must not be empty".to_string(),
            ));
        }
        if codings.is_empty() {
            return Err(ScaffoldError::InvalidSpec(format!(
                "channel '{}' allows no codings",
                name
            )));
        }
        Ok(Self {
            name,
            codings,
            min_len: None,
            max_len: None,
        })
    }

    /// Constrain the number of neurons a produced channel may hold
    pub fn with_len(mut self, min_len: Option<usize>, max_len: Option<usize>) -> ScaffoldResult<Self> {
        if let (Some(min), Some(max)) = (min_len, max_len) {
            if min > max {
                return Err(ScaffoldError::InvalidSpec(format!(
                    "channel '{}' has min_len {} > max_len {}",
                    self.name, min, max
                )));
            }
        }
        self.min_len = min_len;
        self.max_len = max_len;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codings(&self) -> &CodingSet {
        &self.codings
    }

    pub fn min_len(&self) -> Option<usize> {
        self.min_len
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Whether a channel of `len` neurons satisfies the size constraints
    pub fn accepts_len(&self, len: usize) -> bool {
        self.min_len.map_or(true, |min| len >= min) && self.max_len.map_or(true, |max| len <= max)
    }

    pub fn is_compatible_with(&self, consumer: &ChannelSpec) -> bool {
        compatible(self, consumer)
    }
}

/// Producer and consumer channel specs agree on name and share a coding
pub fn compatible(producer: &ChannelSpec, consumer: &ChannelSpec) -> bool {
    producer.name == consumer.name && producer.codings.intersects(&consumer.codings)
}

/// Schema of one logical port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    name: String,
    minimum: usize,
    maximum: usize,
    channels: BTreeMap<String, ChannelSpec>,
}

impl PortSpec {
    /// Declare a port accepting between `minimum` and `maximum` connections.
    ///
    /// Channel names must be unique within the port and a port needs at least
    /// one channel.
    pub fn declare(
        name: impl Into<String>,
        minimum: usize,
        maximum: usize,
        channels: impl IntoIterator<Item = ChannelSpec>,
    ) -> ScaffoldResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ScaffoldError::InvalidSpec(
                "port name must not be empty".to_string(),
            ));
        }
        if minimum > maximum {
            return Err(ScaffoldError::InvalidSpec(format!(
                "port '{}' has minimum {} > maximum {}",
                name, minimum, maximum
            )));
        }
        let mut by_name = BTreeMap::new();
        for channel in channels {
            if by_name.contains_key(channel.name()) {
                return Err(ScaffoldError::InvalidSpec(format!(
                    "port '{}' declares channel '{}' twice",
                    name,
                    channel.name()
                )));
            }
            by_name.insert(channel.name().to_string(), channel);
        }
        if by_name.is_empty() {
            return Err(ScaffoldError::InvalidSpec(format!(
                "port '{}' declares no channels",
                name
            )));
        }
        Ok(Self {
            name,
            minimum,
            maximum,
            channels: by_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    pub fn channels(&self) -> &BTreeMap<String, ChannelSpec> {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelSpec> {
        self.channels.get(name)
    }

    /// Union of codings over all channels
    pub fn codings(&self) -> CodingSet {
        self.channels
            .values()
            .fold(CodingSet::new(), |acc, channel| acc.union(channel.codings()))
    }

    /// Check that a producer port can feed a consumer port.
    ///
    /// Both sides must expose the same channel names and every channel pair
    /// must be [`compatible`]. Returns a human-readable reason on failure.
    pub fn check_feeds(&self, consumer: &PortSpec) -> Result<(), String> {
        for name in consumer.channels.keys() {
            if !self.channels.contains_key(name) {
                return Err(format!("producer has no channel '{}'", name));
            }
        }
        for (name, produced) in &self.channels {
            let Some(accepted) = consumer.channels.get(name) else {
                return Err(format!("consumer has no channel '{}'", name));
            };
            if !compatible(produced, accepted) {
                return Err(format!(
                    "channel '{}' codings {} and {} do not intersect",
                    name,
                    produced.codings(),
                    accepted.codings()
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.maximum == UNBOUNDED {
            write!(f, "{} [{}..]", self.name, self.minimum)
        } else {
            write!(f, "{} [{}..={}]", self.name, self.minimum, self.maximum)
        }
    }
}

/// Collect port specs into a [`PortMap`], rejecting duplicate port names
pub fn port_map(ports: impl IntoIterator<Item = PortSpec>) -> ScaffoldResult<PortMap> {
    let mut map = PortMap::new();
    for port in ports {
        if map.contains_key(port.name()) {
            return Err(ScaffoldError::InvalidSpec(format!(
                "port '{}' declared twice",
                port.name()
            )));
        }
        map.insert(port.name().to_string(), port);
    }
    Ok(map)
}
