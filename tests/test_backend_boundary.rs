// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! A laid scaffold driven through the backend contract by a minimal
//! discrete-time simulator.

use fugu::prelude::*;
use std::collections::BTreeMap;

/// Integrate-and-fire simulator with integer synaptic delays
struct StepBackend;

struct StepOptions {
    max_delay: u32,
}

struct Compiled {
    names: Vec<NeuronId>,
    params: Vec<NeuronParams>,
    fanout: Vec<Vec<(usize, f64, usize)>>,
    forced: BTreeMap<u32, Vec<usize>>,
    max_delay: usize,
}

impl Backend for StepBackend {
    type Options = StepOptions;
    type Artifact = Compiled;

    fn compile(&mut self, handoff: &Handoff<'_>, options: &StepOptions) -> Result<Compiled, BackendError> {
        let graph = handoff.graph;
        let names: Vec<NeuronId> = graph.neurons().map(|n| n.id.clone()).collect();
        let params = graph.neurons().map(|n| n.params).collect();

        let mut fanout = vec![Vec::new(); names.len()];
        for synapse in graph.synapses() {
            let delay = synapse.params.delay;
            if delay.fract() != 0.0 || delay < 1.0 || delay > options.max_delay as f64 {
                return Err(BackendError::Unsupported(format!(
                    "delay {} on {} -> {}",
                    delay, synapse.source, synapse.target
                )));
            }
            let source = graph.position(synapse.source.as_str()).unwrap();
            let target = graph.position(synapse.target.as_str()).unwrap();
            fanout[source].push((target, synapse.params.weight, delay as usize));
        }

        let mut forced: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for schedule in &handoff.input_spikes {
            let position = graph
                .position(schedule.neuron.as_str())
                .ok_or_else(|| BackendError::Compile(format!("unknown input {}", schedule.neuron)))?;
            for &step in &schedule.steps {
                forced.entry(step).or_default().push(position);
            }
        }

        Ok(Compiled {
            names,
            params,
            fanout,
            forced,
            max_delay: options.max_delay as usize,
        })
    }

    fn run(&mut self, artifact: &Compiled, steps: u32) -> Result<ActivationRecord, BackendError> {
        let count = artifact.names.len();
        let mut potential: Vec<f64> = artifact.params.iter().map(|p| p.potential).collect();
        let mut inbox = vec![vec![0.0; count]; steps as usize + artifact.max_delay + 1];
        let mut record = ActivationRecord::new();

        for step in 0..steps {
            let forced = artifact.forced.get(&step).cloned().unwrap_or_default();
            let mut fired = Vec::new();
            for neuron in 0..count {
                let params = &artifact.params[neuron];
                if forced.contains(&neuron) {
                    fired.push(neuron);
                    continue;
                }
                potential[neuron] =
                    potential[neuron] * (1.0 - params.decay) + inbox[step as usize][neuron];
                if potential[neuron] > params.threshold {
                    potential[neuron] = 0.0;
                    fired.push(neuron);
                }
            }
            for &source in &fired {
                for &(target, weight, delay) in &artifact.fanout[source] {
                    inbox[step as usize + delay][target] += weight;
                }
            }
            record.push_step(fired.into_iter().map(|i| artifact.names[i].clone()).collect());
        }
        Ok(record)
    }
}

fn column(bits: &[bool]) -> Vec<Vec<bool>> {
    bits.iter().map(|&bit| vec![bit]).collect()
}

fn gate_circuit(kind: GateKind) -> Scaffold {
    let mut scaffold = Scaffold::new();
    let a = scaffold
        .add_brick(VectorInput::new("A", column(&[true, false, true, false]), Coding::Raster).unwrap())
        .unwrap();
    let b = scaffold
        .add_brick(VectorInput::new("B", column(&[true, true, false, false]), Coding::Raster).unwrap())
        .unwrap();
    let gate = scaffold
        .add_output_brick(LogicGate::new("Gate", kind).unwrap())
        .unwrap();
    scaffold.connect(a, gate).unwrap();
    scaffold.connect(b, gate).unwrap();
    scaffold.lay_bricks().unwrap();
    scaffold
}

#[test]
fn test_and_gate_truth_table() {
    let scaffold = gate_circuit(GateKind::And);
    let handoff = scaffold.handoff().unwrap();

    let mut backend = StepBackend;
    let compiled = backend.compile(&handoff, &StepOptions { max_delay: 4 }).unwrap();
    let record = backend.run(&compiled, 4).unwrap();

    assert_eq!(record.step_count(), 4);
    assert_eq!(record.first_spike("Gate_0"), Some(1));
    assert_eq!(record.first_spike("Gate_1"), None);
    assert_eq!(record.first_spike("Gate_2"), None);
    assert_eq!(record.first_spike("Gate_3"), None);
    // input completion fires after the one-step raster, the relay one step later
    assert_eq!(record.first_spike("A_complete"), Some(1));
    assert_eq!(record.first_spike("Gate_complete"), Some(2));
}

#[test]
fn test_or_gate_truth_table() {
    let scaffold = gate_circuit(GateKind::Or);
    let handoff = scaffold.handoff().unwrap();

    let mut backend = StepBackend;
    let compiled = backend.compile(&handoff, &StepOptions { max_delay: 4 }).unwrap();
    let record = backend.run(&compiled, 4).unwrap();

    let fired: Vec<_> = record.fired_at(1).iter().map(|id| id.as_str()).collect();
    for expected in ["Gate_0", "Gate_1", "Gate_2"] {
        assert!(fired.contains(&expected), "{} should fire on step 1", expected);
    }
    assert_eq!(record.spike_count("Gate_3"), 0);
}

#[test]
fn test_backend_may_refuse_graph() {
    let scaffold = gate_circuit(GateKind::And);
    let handoff = scaffold.handoff().unwrap();
    let result = StepBackend.compile(&handoff, &StepOptions { max_delay: 0 });
    assert!(matches!(result, Err(BackendError::Unsupported(_))));
}

#[test]
fn test_output_ports_identify_result_neurons() {
    let scaffold = gate_circuit(GateKind::And);
    let handoff = scaffold.handoff().unwrap();
    let output = handoff.output("Gate").unwrap();
    let data = output.ports["output"].channel("data").unwrap();
    let names: Vec<_> = data.neurons().iter().map(|id| id.as_str()).collect();
    assert_eq!(names, vec!["Gate_0", "Gate_1", "Gate_2", "Gate_3"]);
    assert!(handoff.output("A").is_none());
}
