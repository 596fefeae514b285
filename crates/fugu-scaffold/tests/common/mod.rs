// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Small bricks shared by the scaffold integration tests

#![allow(dead_code)]

use fugu_scaffold::{
    port_map, Brick, BrickError, BrickInputs, BrickOutputs, BrickResult, ChannelSpec, Coding,
    CodingSet, GraphBuilder, InputSpikes, NeuronId, PortData, PortMap, PortSpec, SynapseParams,
};

/// Port with a `data` channel and a `complete` spike channel
pub fn signal_port(name: &str, minimum: usize, maximum: usize, data: CodingSet) -> PortSpec {
    PortSpec::declare(
        name,
        minimum,
        maximum,
        [
            ChannelSpec::new("data", data).unwrap(),
            ChannelSpec::new("complete", [Coding::Spike]).unwrap(),
        ],
    )
    .unwrap()
}

/// Emits `size` data neurons and one completion neuron
#[derive(Debug)]
pub struct Source {
    name: String,
    size: usize,
    coding: Coding,
    inputs: PortMap,
    outputs: PortMap,
    driven: Vec<NeuronId>,
}

impl Source {
    pub fn new(name: &str, size: usize, coding: Coding) -> Self {
        Self::with_allowed(name, size, CodingSet::from([coding]), coding)
    }

    /// Declares `allowed` on its data channel but always emits `coding`
    pub fn with_allowed(name: &str, size: usize, allowed: CodingSet, coding: Coding) -> Self {
        Self {
            name: name.to_string(),
            size,
            coding,
            inputs: PortMap::new(),
            outputs: port_map([signal_port("output", 0, usize::MAX, allowed)]).unwrap(),
            driven: Vec::new(),
        }
    }

    /// Restrict how many consumers the output port may feed
    pub fn fanout(mut self, minimum: usize, maximum: usize) -> Self {
        let data = self.outputs["output"].channels()["data"].codings().clone();
        self.outputs = port_map([signal_port("output", minimum, maximum, data)]).unwrap();
        self
    }
}

impl Brick for Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_ports(&self) -> &PortMap {
        &self.inputs
    }

    fn output_ports(&self) -> &PortMap {
        &self.outputs
    }

    fn build(&mut self, graph: &mut GraphBuilder<'_>, _inputs: &BrickInputs) -> BrickResult<BrickOutputs> {
        let mut output = PortData::make_from_spec(&self.outputs["output"]);
        for i in 0..self.size {
            let params = graph.default_neuron().with_index(i as i64);
            let id = graph.add_neuron(i, params)?;
            self.driven.push(id.clone());
            output.push_neuron("data", id)?;
        }
        let complete = graph.add_neuron("complete", graph.default_neuron().with_index(-1))?;
        output.push_neuron("complete", complete)?;
        output.resolve_coding("data", self.coding)?;
        output.resolve_coding("complete", Coding::Spike)?;
        Ok(BrickOutputs::from([("output".to_string(), output)]))
    }

    fn input_spikes(&self) -> Vec<InputSpikes> {
        self.driven
            .iter()
            .map(|neuron| InputSpikes {
                neuron: neuron.clone(),
                steps: vec![0],
            })
            .collect()
    }
}

/// Relays the completion of every input through one neuron
#[derive(Debug)]
pub struct Merge {
    name: String,
    inputs: PortMap,
    outputs: PortMap,
}

impl Merge {
    pub fn new(name: &str, minimum: usize, maximum: usize) -> Self {
        Self::accepting(name, minimum, maximum, CodingSet::from([Coding::Raster, Coding::Rate]))
    }

    pub fn accepting(name: &str, minimum: usize, maximum: usize, data: CodingSet) -> Self {
        Self {
            name: name.to_string(),
            inputs: port_map([signal_port("input", minimum, maximum, data)]).unwrap(),
            outputs: port_map([signal_port(
                "output",
                0,
                usize::MAX,
                CodingSet::from([Coding::Raster]),
            )])
            .unwrap(),
        }
    }
}

impl Brick for Merge {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_ports(&self) -> &PortMap {
        &self.inputs
    }

    fn output_ports(&self) -> &PortMap {
        &self.outputs
    }

    fn build(&mut self, graph: &mut GraphBuilder<'_>, inputs: &BrickInputs) -> BrickResult<BrickOutputs> {
        let relay = graph.add_neuron("relay", graph.default_neuron())?;
        for input in inputs.port("input") {
            for complete in input.require("complete")?.neurons() {
                graph.add_synapse(complete, &relay, SynapseParams::new(1.0, 1.0))?;
            }
        }
        let mut output = PortData::make_from_spec(&self.outputs["output"]);
        output.push_neuron("data", relay.clone())?;
        output.push_neuron("complete", relay)?;
        output.resolve_coding("data", Coding::Raster)?;
        output.resolve_coding("complete", Coding::Spike)?;
        Ok(BrickOutputs::from([("output".to_string(), output)]))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Fault {
    /// Adds a neuron, then reports a contract violation
    Fails,
    /// Leaves the data coding unresolved
    Unresolved,
    /// Returns no output ports at all
    NoOutputs,
    /// Emits more data neurons than `max_len` allows
    Oversized,
}

/// Brick that misbehaves in a chosen way
#[derive(Debug)]
pub struct Faulty {
    name: String,
    fault: Fault,
    inputs: PortMap,
    outputs: PortMap,
}

impl Faulty {
    pub fn new(name: &str, fault: Fault) -> Self {
        let data = ChannelSpec::new("data", [Coding::Raster])
            .unwrap()
            .with_len(Some(1), Some(2))
            .unwrap();
        Self {
            name: name.to_string(),
            fault,
            inputs: port_map([signal_port(
                "input",
                0,
                1,
                CodingSet::from([Coding::Raster]),
            )])
            .unwrap(),
            outputs: port_map([PortSpec::declare("output", 0, usize::MAX, [data]).unwrap()])
                .unwrap(),
        }
    }
}

impl Brick for Faulty {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_ports(&self) -> &PortMap {
        &self.inputs
    }

    fn output_ports(&self) -> &PortMap {
        &self.outputs
    }

    fn build(&mut self, graph: &mut GraphBuilder<'_>, _inputs: &BrickInputs) -> BrickResult<BrickOutputs> {
        let mut output = PortData::make_from_spec(&self.outputs["output"]);
        let first = graph.add_neuron(0, graph.default_neuron())?;
        output.push_neuron("data", first)?;
        match self.fault {
            Fault::Fails => return Err(BrickError::Contract("wiring is wrong".to_string())),
            Fault::Unresolved => {}
            Fault::NoOutputs => return Ok(BrickOutputs::new()),
            Fault::Oversized => {
                for i in 1..3 {
                    let id = graph.add_neuron(i, graph.default_neuron())?;
                    output.push_neuron("data", id)?;
                }
                output.resolve_coding("data", Coding::Raster)?;
            }
        }
        Ok(BrickOutputs::from([("output".to_string(), output)]))
    }
}
