// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Human-readable scaffold report

use std::fmt::Write;
use tracing::debug;

use super::Scaffold;
use crate::ports::PortMap;

impl Scaffold {
    /// Describe bricks, ports and connections without changing anything.
    ///
    /// - `0`: one line per brick
    /// - `1`: plus ports, channels and resolved codings
    /// - `2` and above: plus connections, build order and graph size
    pub fn summary(&self, verbose: u8) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Scaffold ({}): {} bricks, {} connections",
            self.state,
            self.bricks.len(),
            self.connections.len()
        );

        for (index, slot) in self.bricks.iter().enumerate() {
            let _ = writeln!(
                out,
                "  #{} {} [{}]{}",
                index,
                slot.name(),
                slot.state,
                if slot.output { " output" } else { "" }
            );
            if verbose >= 1 {
                write_ports(&mut out, "in ", slot.brick.input_ports());
                write_ports(&mut out, "out", slot.brick.output_ports());
                for (port, data) in &slot.outputs {
                    for (name, channel) in data.channels() {
                        let coding = channel
                            .coding()
                            .map_or_else(|| "unresolved".to_string(), |c| c.to_string());
                        let _ = writeln!(
                            out,
                            "      {}.{} = {} x{}",
                            port,
                            name,
                            coding,
                            channel.len()
                        );
                    }
                }
            }
        }

        if verbose >= 2 {
            let _ = writeln!(out, "Connections:");
            for connection in &self.connections {
                let _ = writeln!(
                    out,
                    "  {}.{} -> {}.{}",
                    self.bricks[connection.producer.0].name(),
                    connection.producer_port,
                    self.bricks[connection.consumer.0].name(),
                    connection.consumer_port
                );
            }
            if !self.build_order.is_empty() {
                let order: Vec<_> = self
                    .build_order
                    .iter()
                    .map(|handle| self.bricks[handle.0].name())
                    .collect();
                let _ = writeln!(out, "Build order: {}", order.join(" -> "));
            }
            let _ = writeln!(
                out,
                "Graph: {} neurons, {} synapses",
                self.graph.neuron_count(),
                self.graph.synapse_count()
            );
        }

        debug!(target: "fugu-scaffold", "\n{}", out);
        out
    }
}

fn write_ports(out: &mut String, direction: &str, ports: &PortMap) {
    for spec in ports.values() {
        let channels: Vec<_> = spec
            .channels()
            .values()
            .map(|channel| format!("{}{}", channel.name(), channel.codings()))
            .collect();
        let _ = writeln!(out, "    {} {}: {}", direction, spec, channels.join(", "));
    }
}
