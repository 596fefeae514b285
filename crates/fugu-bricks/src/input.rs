// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Spike-raster input encoder

use fugu_scaffold::{
    port_map, Brick, BrickError, BrickInputs, BrickOutputs, BrickResult, Coding, CodingSet,
    GraphBuilder, InputSpikes, PortData, PortMap, ScaffoldError, ScaffoldResult,
};
use tracing::debug;

use crate::{signal_port, COMPLETE, DATA, OUTPUT};

/// Codings a [`VectorInput`] can present its rows with
pub fn input_codings() -> CodingSet {
    CodingSet::from([
        Coding::Raster,
        Coding::Rate,
        Coding::Binary,
        Coding::Unary,
        Coding::Temporal,
        Coding::Population,
    ])
}

/// Drives one neuron per row of a spike raster.
///
/// `spikes[i][t]` means neuron `i` fires on step `t`. The completion neuron
/// fires on the step after the raster ends.
#[derive(Debug)]
pub struct VectorInput {
    name: String,
    spikes: Vec<Vec<bool>>,
    coding: Coding,
    inputs: PortMap,
    outputs: PortMap,
    schedule: Vec<InputSpikes>,
}

impl VectorInput {
    pub fn new(name: impl Into<String>, spikes: Vec<Vec<bool>>, coding: Coding) -> ScaffoldResult<Self> {
        let name = name.into();
        if !input_codings().contains(coding) {
            return Err(ScaffoldError::InvalidSpec(format!(
                "input brick '{}' cannot present data as {}",
                name, coding
            )));
        }
        let (inputs, outputs) = Self::schema()?;
        Ok(Self {
            name,
            spikes,
            coding,
            inputs,
            outputs,
            schedule: Vec::new(),
        })
    }

    /// Raster where row `i` fires once, on step `times[i]`
    pub fn from_spike_times(name: impl Into<String>, times: &[usize], coding: Coding) -> ScaffoldResult<Self> {
        let steps = times.iter().max().map_or(0, |last| last + 1);
        let spikes = times
            .iter()
            .map(|&time| (0..steps).map(|step| step == time).collect())
            .collect();
        Self::new(name, spikes, coding)
    }

    /// `(input ports, output ports)`; input bricks have no inputs
    pub fn schema() -> ScaffoldResult<(PortMap, PortMap)> {
        Ok((
            PortMap::new(),
            port_map([signal_port(OUTPUT, 0, usize::MAX, input_codings())?])?,
        ))
    }

    /// Length of the time dimension
    pub fn steps(&self) -> usize {
        self.spikes.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn coding(&self) -> Coding {
        self.coding
    }
}

impl Brick for VectorInput {
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
        let mut output = PortData::make_from_spec(&self.outputs[OUTPUT]);
        let mut schedule = Vec::with_capacity(self.spikes.len() + 1);

        for (row, fires) in self.spikes.iter().enumerate() {
            let id = graph.add_neuron(row, graph.default_neuron().with_index(row as i64))?;
            let steps = fires
                .iter()
                .enumerate()
                .filter(|&(_, &fire)| fire)
                .map(|(step, _)| schedule_step(step))
                .collect::<BrickResult<Vec<u32>>>()?;
            if !steps.is_empty() {
                schedule.push(InputSpikes {
                    neuron: id.clone(),
                    steps,
                });
            }
            output.push_neuron(DATA, id)?;
        }

        let complete = graph.add_neuron(COMPLETE, graph.default_neuron().with_index(-1))?;
        schedule.push(InputSpikes {
            neuron: complete.clone(),
            steps: vec![schedule_step(self.steps())?],
        });
        output.push_neuron(COMPLETE, complete)?;

        output.resolve_coding(DATA, self.coding)?;
        output.resolve_coding(COMPLETE, Coding::Spike)?;
        output.set_shape(DATA, vec![self.spikes.len(), self.steps()])?;

        debug!(
            target: "fugu-bricks",
            "{}: {} input neurons over {} steps ({})",
            self.name,
            self.spikes.len(),
            self.steps(),
            self.coding
        );
        self.schedule = schedule;
        Ok(BrickOutputs::from([(OUTPUT.to_string(), output)]))
    }

    fn input_spikes(&self) -> Vec<InputSpikes> {
        self.schedule.clone()
    }
}

/// Backends index steps as `u32`
fn schedule_step(step: usize) -> BrickResult<u32> {
    u32::try_from(step)
        .map_err(|_| BrickError::Contract(format!("step {} is beyond the schedulable range", step)))
}
