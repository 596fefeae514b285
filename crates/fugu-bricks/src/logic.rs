// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Two-input combinational gates

use fugu_scaffold::{
    port_map, Brick, BrickError, BrickInputs, BrickOutputs, BrickResult, Coding, CodingSet,
    GraphBuilder, NeuronParams, PortData, PortMap, ScaffoldResult, SynapseParams,
};
use std::fmt;
use tracing::debug;

use crate::{signal_port, COMPLETE, DATA, INPUT, OUTPUT};

/// Propagation delay of every gate synapse, in steps
const GATE_DELAY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    And,
    Or,
}

impl GateKind {
    /// Output neuron threshold and per-operand synapse weight
    fn wiring(&self) -> (f64, f64) {
        match self {
            // both operands are needed to cross the threshold
            GateKind::And => (1.0, 0.75),
            GateKind::Or => (0.5, 1.0),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::And => write!(f, "AND"),
            GateKind::Or => write!(f, "OR"),
        }
    }
}

/// Codings gate operands may use
pub fn gate_codings() -> CodingSet {
    CodingSet::from([Coding::Raster, Coding::Binary, Coding::Unary])
}

/// Element-wise gate over exactly two operands.
///
/// Operands bind in connection order. If their data channels differ in
/// length only the overlapping prefix is combined. The output keeps the
/// first operand's coding, and its completion neuron relays the first
/// operand's completion one step later.
#[derive(Debug)]
pub struct LogicGate {
    name: String,
    kind: GateKind,
    inputs: PortMap,
    outputs: PortMap,
}

impl LogicGate {
    pub fn new(name: impl Into<String>, kind: GateKind) -> ScaffoldResult<Self> {
        let (inputs, outputs) = Self::schema()?;
        Ok(Self {
            name: name.into(),
            kind,
            inputs,
            outputs,
        })
    }

    pub fn and(name: impl Into<String>) -> ScaffoldResult<Self> {
        Self::new(name, GateKind::And)
    }

    pub fn or(name: impl Into<String>) -> ScaffoldResult<Self> {
        Self::new(name, GateKind::Or)
    }

    /// `(input ports, output ports)` shared by every gate
    pub fn schema() -> ScaffoldResult<(PortMap, PortMap)> {
        Ok((
            port_map([signal_port(INPUT, 2, 2, gate_codings())?])?,
            port_map([signal_port(OUTPUT, 0, usize::MAX, gate_codings())?])?,
        ))
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }
}

impl Brick for LogicGate {
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
        let operands = inputs.ordered(INPUT, 2)?;
        let (left, right) = (&operands[0], &operands[1]);
        let left_data = left.require(DATA)?;
        let right_data = right.require(DATA)?;

        let coding = left_data
            .coding()
            .ok_or_else(|| BrickError::Contract("first operand's data coding is unresolved".to_string()))?;
        let started = left
            .require(COMPLETE)?
            .get(0)
            .ok_or_else(|| BrickError::Contract("first operand has no completion neuron".to_string()))?;

        let width = left_data.len().min(right_data.len());
        if left_data.len() != right_data.len() {
            debug!(
                target: "fugu-bricks",
                "{}: operand widths differ ({} vs {}), combining the first {}",
                self.name,
                left_data.len(),
                right_data.len(),
                width
            );
        }

        let (threshold, weight) = self.kind.wiring();
        let mut output = PortData::make_from_spec(&self.outputs[OUTPUT]);
        for (position, (a, b)) in left_data
            .neurons()
            .iter()
            .zip(right_data.neurons())
            .enumerate()
        {
            let params = NeuronParams {
                index: position as i64,
                threshold,
                decay: 1.0,
                p: 1.0,
                potential: 0.0,
            };
            let gate = graph.add_neuron(position, params)?;
            graph.add_synapse(a, &gate, SynapseParams::new(weight, GATE_DELAY))?;
            graph.add_synapse(b, &gate, SynapseParams::new(weight, GATE_DELAY))?;
            output.push_neuron(DATA, gate)?;
        }

        let relay = NeuronParams {
            index: -1,
            threshold: 0.5,
            decay: 1.0,
            p: 1.0,
            potential: 0.0,
        };
        let complete = graph.add_neuron(COMPLETE, relay)?;
        graph.add_synapse(started, &complete, SynapseParams::new(1.0, GATE_DELAY))?;
        output.push_neuron(COMPLETE, complete)?;

        output.resolve_coding(DATA, coding)?;
        output.resolve_coding(COMPLETE, Coding::Spike)?;
        output.set_shape(DATA, vec![width])?;

        debug!(target: "fugu-bricks", "{}: {} gate over {} elements", self.name, self.kind, width);
        Ok(BrickOutputs::from([(OUTPUT.to_string(), output)]))
    }
}
