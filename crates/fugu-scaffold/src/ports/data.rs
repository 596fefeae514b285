// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Concrete port and channel data produced during a build pass

use fugu_graph::NeuronId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::coding::{Coding, CodingSet};
use crate::ports::spec::PortSpec;
use crate::types::{BrickError, BrickResult};

/// Neurons carrying one channel of a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    name: String,
    allowed: CodingSet,
    coding: Option<Coding>,
    neurons: Vec<NeuronId>,
    shape: Option<Vec<usize>>,
}

impl ChannelData {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coding chosen by the producer, `None` until resolved
    pub fn coding(&self) -> Option<Coding> {
        self.coding
    }

    pub fn allowed(&self) -> &CodingSet {
        &self.allowed
    }

    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub fn get(&self, position: usize) -> Option<&NeuronId> {
        self.neurons.get(position)
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn shape(&self) -> Option<&[usize]> {
        self.shape.as_deref()
    }
}

/// Concrete instantiation of a [`PortSpec`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortData {
    name: String,
    channels: BTreeMap<String, ChannelData>,
}

impl PortData {
    /// Empty channel data for every channel of `spec`, codings unresolved
    pub fn make_from_spec(spec: &PortSpec) -> Self {
        let channels = spec
            .channels()
            .values()
            .map(|channel| {
                (
                    channel.name().to_string(),
                    ChannelData {
                        name: channel.name().to_string(),
                        allowed: channel.codings().clone(),
                        coding: None,
                        neurons: Vec::new(),
                        shape: None,
                    },
                )
            })
            .collect();
        Self {
            name: spec.name().to_string(),
            channels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> &BTreeMap<String, ChannelData> {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelData> {
        self.channels.get(name)
    }

    /// Like [`channel`](Self::channel), but a missing channel is a build error
    pub fn require(&self, name: &str) -> BrickResult<&ChannelData> {
        self.channels.get(name).ok_or_else(|| self.unknown(name))
    }

    /// Fix the coding of a channel; it must be one the channel allows
    pub fn resolve_coding(&mut self, channel: &str, coding: Coding) -> BrickResult<()> {
        let port = self.name.clone();
        let data = self.channel_mut(channel)?;
        if !data.allowed.contains(coding) {
            return Err(BrickError::CodingMismatch {
                port,
                channel: channel.to_string(),
                found: coding,
                allowed: data.allowed.clone(),
            });
        }
        data.coding = Some(coding);
        Ok(())
    }

    pub fn push_neuron(&mut self, channel: &str, neuron: NeuronId) -> BrickResult<()> {
        self.channel_mut(channel)?.neurons.push(neuron);
        Ok(())
    }

    pub fn extend_neurons(
        &mut self,
        channel: &str,
        neurons: impl IntoIterator<Item = NeuronId>,
    ) -> BrickResult<()> {
        self.channel_mut(channel)?.neurons.extend(neurons);
        Ok(())
    }

    pub fn set_shape(&mut self, channel: &str, shape: Vec<usize>) -> BrickResult<()> {
        self.channel_mut(channel)?.shape = Some(shape);
        Ok(())
    }

    fn channel_mut(&mut self, name: &str) -> BrickResult<&mut ChannelData> {
        let port = &self.name;
        self.channels
            .get_mut(name)
            .ok_or_else(|| BrickError::UnknownChannel {
                port: port.clone(),
                channel: name.to_string(),
            })
    }

    fn unknown(&self, channel: &str) -> BrickError {
        BrickError::UnknownChannel {
            port: self.name.clone(),
            channel: channel.to_string(),
        }
    }
}

/// Port data delivered to a consumer, grouped by input port.
///
/// Within a port, entries are in the order the connections were declared.
#[derive(Debug, Clone, Default)]
pub struct BrickInputs {
    ports: BTreeMap<String, Vec<Arc<PortData>>>,
}

impl BrickInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one delivered [`PortData`] to `port`
    pub fn bind(&mut self, port: impl Into<String>, data: Arc<PortData>) {
        self.ports.entry(port.into()).or_default().push(data);
    }

    /// Everything bound to `port`; empty if nothing is
    pub fn port(&self, port: &str) -> &[Arc<PortData>] {
        self.ports.get(port).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn connection_count(&self, port: &str) -> usize {
        self.port(port).len()
    }

    /// Inputs of `port` in binding order, requiring exactly `expected` of them
    pub fn ordered(&self, port: &str, expected: usize) -> BrickResult<&[Arc<PortData>]> {
        let bound = self.port(port);
        if bound.len() != expected {
            return Err(BrickError::Contract(format!(
                "expected exactly {} inputs on port '{}', got {}",
                expected,
                port,
                bound.len()
            )));
        }
        Ok(bound)
    }

    /// The only input of `port`
    pub fn single(&self, port: &str) -> BrickResult<&PortData> {
        Ok(self.ordered(port, 1)?[0].as_ref())
    }

    pub fn ports(&self) -> impl Iterator<Item = (&str, &[Arc<PortData>])> + '_ {
        self.ports
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.ports.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::spec::ChannelSpec;

    fn spec() -> PortSpec {
        PortSpec::declare(
            "output",
            0,
            1,
            [
                ChannelSpec::new("data", [Coding::Raster, Coding::Binary]).unwrap(),
                ChannelSpec::new("complete", [Coding::Spike]).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_make_from_spec_is_unresolved() {
        let data = PortData::make_from_spec(&spec());
        assert_eq!(data.name(), "output");
        assert_eq!(data.channels().len(), 2);
        assert!(data.channels().values().all(|c| c.coding().is_none() && c.is_empty()));
    }

    #[test]
    fn test_resolve_coding_checks_allowed_set() {
        let mut data = PortData::make_from_spec(&spec());
        data.resolve_coding("data", Coding::Binary).unwrap();
        assert_eq!(data.channel("data").unwrap().coding(), Some(Coding::Binary));

        let err = data.resolve_coding("complete", Coding::Rate).unwrap_err();
        assert!(matches!(err, BrickError::CodingMismatch { found: Coding::Rate, .. }));
        assert!(data.channel("complete").unwrap().coding().is_none());
    }

    #[test]
    fn test_unknown_channel() {
        let mut data = PortData::make_from_spec(&spec());
        let err = data.push_neuron("value", "A_0".into()).unwrap_err();
        match err {
            BrickError::UnknownChannel { port, channel } => {
                assert_eq!(port, "output");
                assert_eq!(channel, "value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ordered_inputs_keep_binding_order() {
        let mut first = PortData::make_from_spec(&spec());
        first.push_neuron("data", "A_0".into()).unwrap();
        let mut second = PortData::make_from_spec(&spec());
        second.push_neuron("data", "B_0".into()).unwrap();

        let mut inputs = BrickInputs::new();
        inputs.bind("input", Arc::new(first));
        inputs.bind("input", Arc::new(second));

        let ordered = inputs.ordered("input", 2).unwrap();
        assert_eq!(ordered[0].channel("data").unwrap().neurons()[0].as_str(), "A_0");
        assert_eq!(ordered[1].channel("data").unwrap().neurons()[0].as_str(), "B_0");

        let err = inputs.ordered("input", 3).unwrap_err();
        assert_eq!(err.to_string(), "expected exactly 3 inputs on port 'input', got 2");
        assert!(inputs.single("input").is_err());
        assert!(inputs.port("other").is_empty());
    }
}
