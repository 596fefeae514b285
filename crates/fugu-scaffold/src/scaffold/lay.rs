// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

/*!
The build pass.

Planning (dependency DAG, cycle detection, ordering and every port's
cardinality check) finishes before the first brick builds, so planning errors
leave the graph empty. Any error moves the scaffold to `Failed`.
*/

use fugu_graph::GraphBuilder;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::ordering::DependencyGraph;
use super::{BrickHandle, Scaffold, ScaffoldState};
use crate::brick::{BrickOutputs, BrickState};
use crate::ports::{BrickInputs, PortMap, PortSpec, UNBOUNDED};
use crate::types::{ScaffoldError, ScaffoldResult};

impl Scaffold {
    /// Build every brick once, producers before consumers.
    ///
    /// A scaffold can be laid once. On error it is left `Failed` and every
    /// later call returns [`ScaffoldError::Poisoned`].
    pub fn lay_bricks(&mut self) -> ScaffoldResult<()> {
        match self.state {
            ScaffoldState::Open => {}
            ScaffoldState::Laid => return Err(ScaffoldError::AlreadyLaid),
            ScaffoldState::Failed => return Err(ScaffoldError::Poisoned),
        }
        info!(
            target: "fugu-scaffold",
            "Laying {} bricks with {} connections",
            self.bricks.len(),
            self.connections.len()
        );

        let outcome = match self.plan() {
            Ok(order) => self.execute(&order),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => {
                self.state = ScaffoldState::Laid;
                info!(
                    target: "fugu-scaffold",
                    "Scaffold laid: {} neurons, {} synapses",
                    self.graph.neuron_count(),
                    self.graph.synapse_count()
                );
                if self.config.log_summary_after_lay {
                    // summary() emits the report at debug level itself
                    self.summary(self.config.summary_verbosity);
                }
                Ok(())
            }
            Err(err) => {
                self.state = ScaffoldState::Failed;
                error!(target: "fugu-scaffold", "lay_bricks aborted: {}", err);
                Err(err)
            }
        }
    }

    fn plan(&self) -> ScaffoldResult<Vec<BrickHandle>> {
        let deps = DependencyGraph::new(
            self.bricks.len(),
            self.connections
                .iter()
                .map(|connection| (connection.producer.0, connection.consumer.0)),
        );
        let order = deps.schedule().map_err(|members| ScaffoldError::CyclicGraph {
            bricks: members
                .into_iter()
                .map(|index| self.bricks[index].name().to_string())
                .collect(),
        })?;

        for &index in &order {
            self.check_cardinality(BrickHandle(index))?;
        }

        let names: Vec<_> = order.iter().map(|&index| self.bricks[index].name()).collect();
        info!(target: "fugu-scaffold", "Build order: {}", names.join(" -> "));
        Ok(order.into_iter().map(BrickHandle).collect())
    }

    /// Every declared port, input and output, must be bound within its
    /// `[minimum, maximum]` range
    fn check_cardinality(&self, handle: BrickHandle) -> ScaffoldResult<()> {
        let slot = &self.bricks[handle.0];
        for (port, spec) in slot.brick.input_ports() {
            let bound = self
                .connections
                .iter()
                .filter(|connection| connection.consumer == handle && &connection.consumer_port == port)
                .count();
            check_bound(slot.name(), spec, bound)?;
        }
        for (port, spec) in slot.brick.output_ports() {
            let bound = self
                .connections
                .iter()
                .filter(|connection| connection.producer == handle && &connection.producer_port == port)
                .count();
            check_bound(slot.name(), spec, bound)?;
        }
        Ok(())
    }

    fn execute(&mut self, order: &[BrickHandle]) -> ScaffoldResult<()> {
        for &handle in order {
            let inputs = self.gather_inputs(handle)?;
            let slot = &mut self.bricks[handle.0];
            let name = slot.brick.name().to_string();

            let mut builder = GraphBuilder::new(&mut self.graph, name.clone(), self.defaults);
            let outputs = slot
                .brick
                .build(&mut builder, &inputs)
                .map_err(|err| err.into_scaffold_error(&name))?;
            let (neurons, synapses) = (builder.neurons_added(), builder.synapses_added());

            validate_outputs(&name, slot.brick.output_ports(), &outputs)?;
            slot.outputs = outputs
                .into_iter()
                .map(|(port, data)| (port, Arc::new(data)))
                .collect();
            slot.state = BrickState::Built;
            self.build_order.push(handle);
            debug!(
                target: "fugu-scaffold",
                "Built brick '{}': {} neurons, {} synapses",
                name,
                neurons,
                synapses
            );
        }
        Ok(())
    }

    /// Collect producer outputs for `handle`, checking each delivered coding
    /// against the consumer's channel spec
    fn gather_inputs(&self, handle: BrickHandle) -> ScaffoldResult<BrickInputs> {
        let consumer = &self.bricks[handle.0];
        let mut inputs = BrickInputs::new();
        for connection in self.connections.iter().filter(|c| c.consumer == handle) {
            let producer = &self.bricks[connection.producer.0];
            let data = producer.outputs.get(&connection.producer_port).ok_or_else(|| {
                ScaffoldError::build(
                    consumer.name(),
                    format!(
                        "producer '{}' delivered nothing on port '{}'",
                        producer.name(),
                        connection.producer_port
                    ),
                )
            })?;
            let accepted = consumer
                .brick
                .input_ports()
                .get(&connection.consumer_port)
                .ok_or_else(|| {
                    ScaffoldError::build(
                        consumer.name(),
                        format!("input port '{}' is not declared", connection.consumer_port),
                    )
                })?;
            for (channel_name, channel) in data.channels() {
                let Some(spec) = accepted.channel(channel_name) else {
                    continue;
                };
                match channel.coding() {
                    Some(coding) if spec.codings().contains(coding) => {}
                    found => {
                        return Err(ScaffoldError::coding_mismatch(
                            consumer.name(),
                            &connection.consumer_port,
                            channel_name,
                            found,
                            spec.codings(),
                        ))
                    }
                }
            }
            inputs.bind(connection.consumer_port.clone(), Arc::clone(data));
        }
        Ok(inputs)
    }
}

fn check_bound(brick: &str, spec: &PortSpec, bound: usize) -> ScaffoldResult<()> {
    if bound == 0 && spec.minimum() > 0 {
        return Err(ScaffoldError::UnsatisfiedPort {
            brick: brick.to_string(),
            port: spec.name().to_string(),
            minimum: spec.minimum(),
        });
    }
    if bound < spec.minimum() || bound > spec.maximum() {
        return Err(ScaffoldError::PortCardinality {
            brick: brick.to_string(),
            port: spec.name().to_string(),
            connections: bound,
            minimum: spec.minimum(),
            maximum: spec.maximum(),
        });
    }
    Ok(())
}

/// Check a brick's returned outputs against its declared output ports
fn validate_outputs(brick: &str, declared: &PortMap, outputs: &BrickOutputs) -> ScaffoldResult<()> {
    if let Some(extra) = outputs.keys().find(|port| !declared.contains_key(*port)) {
        return Err(ScaffoldError::build(
            brick,
            format!("returned undeclared output port '{}'", extra),
        ));
    }
    for (port, spec) in declared {
        let data = outputs
            .get(port)
            .ok_or_else(|| ScaffoldError::build(brick, format!("did not return output port '{}'", port)))?;
        if let Some(extra) = data.channels().keys().find(|channel| spec.channel(channel).is_none()) {
            return Err(ScaffoldError::build(
                brick,
                format!("output port '{}' carries undeclared channel '{}'", port, extra),
            ));
        }
        for (channel_name, channel_spec) in spec.channels() {
            let channel = data.channel(channel_name).ok_or_else(|| {
                ScaffoldError::build(
                    brick,
                    format!("output {}.{} is missing", port, channel_name),
                )
            })?;
            match channel.coding() {
                Some(coding) if channel_spec.codings().contains(coding) => {}
                found => {
                    return Err(ScaffoldError::coding_mismatch(
                        brick,
                        port,
                        channel_name,
                        found,
                        channel_spec.codings(),
                    ))
                }
            }
            if !channel_spec.accepts_len(channel.len()) {
                return Err(ScaffoldError::build(
                    brick,
                    format!(
                        "output {}.{} holds {} neurons, allowed {}..={}",
                        port,
                        channel_name,
                        channel.len(),
                        channel_spec.min_len().unwrap_or(0),
                        channel_spec.max_len().unwrap_or(UNBOUNDED)
                    ),
                ));
            }
        }
    }
    Ok(())
}
