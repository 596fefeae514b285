// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Lay a two-operand gate circuit and print the scaffold report.
//!
//! ```text
//! scaffold_report 1,0,1,1 1,1,0,1 --verbosity 2 --snapshot and.json
//! ```
//!
//! Each operand is a comma-separated bit vector; bit `i` drives input neuron
//! `i` on step 0.

use std::env;
use std::path::PathBuf;
use std::process;

use fugu::config::{find_config_file, load_config, FuguConfig};
use fugu::observability::{debug_flags_help, init_console_logging, parse_debug_flags};
use fugu::prelude::*;
use tracing::{info, warn};

struct Args {
    operands: Vec<Vec<bool>>,
    kind: GateKind,
    config: Option<PathBuf>,
    verbosity: Option<u8>,
    snapshot: Option<PathBuf>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: scaffold_report <bits> <bits> [--or] [--config <path>] [--verbosity 0|1|2] [--snapshot <path>]\n\n\
         Bits are comma-separated 0/1 values, e.g. 1,0,1,1\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_bits(raw: &str) -> Vec<bool> {
    raw.split(',')
        .map(|bit| match bit.trim() {
            "1" => true,
            "0" => false,
            other => {
                eprintln!("Invalid bit '{other}' in '{raw}'");
                usage_and_exit();
            }
        })
        .collect()
}

fn parse_args() -> Args {
    let mut args = Args {
        operands: Vec::new(),
        kind: GateKind::And,
        config: None,
        verbosity: None,
        snapshot: None,
    };

    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--or" => args.kind = GateKind::Or,
            "--config" => {
                let v = raw.next().unwrap_or_else(|| usage_and_exit());
                args.config = Some(PathBuf::from(v));
            }
            "--verbosity" => {
                let v = raw.next().unwrap_or_else(|| usage_and_exit());
                args.verbosity = Some(v.parse().unwrap_or_else(|_| usage_and_exit()));
            }
            "--snapshot" => {
                let v = raw.next().unwrap_or_else(|| usage_and_exit());
                args.snapshot = Some(PathBuf::from(v));
            }
            "-h" | "--help" => usage_and_exit(),
            // consumed by parse_debug_flags
            flag if flag.starts_with("--debug-") => {}
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
            bits => args.operands.push(parse_bits(bits)),
        }
    }

    if args.operands.len() != 2 {
        eprintln!("Expected exactly two operands, got {}", args.operands.len());
        usage_and_exit();
    }
    args
}

fn load(args: &Args) -> FuguConfig {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => find_config_file().ok(),
    };
    match path {
        Some(path) => load_config(Some(path.as_path()), None).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {e}", path.display());
            process::exit(2);
        }),
        None => FuguConfig::default(),
    }
}

fn build(args: &Args, config: &FuguConfig) -> ScaffoldResult<Scaffold> {
    let mut scaffold = Scaffold::with_config(config);
    let mut handles = Vec::with_capacity(2);
    for (operand, name) in args.operands.iter().zip(["A", "B"]) {
        let column = operand.iter().map(|&bit| vec![bit]).collect();
        handles.push(scaffold.add_brick(VectorInput::new(name, column, Coding::Raster)?)?);
    }
    let gate = scaffold.add_output_brick(LogicGate::new("Gate", args.kind)?)?;
    for handle in handles {
        scaffold.connect(handle, gate)?;
    }
    scaffold.lay_bricks()?;
    Ok(scaffold)
}

fn main() {
    let args = parse_args();
    let config = load(&args);

    let flags = parse_debug_flags();
    if let Err(e) = init_console_logging(&flags, &config.logging.level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if args.operands[0].len() != args.operands[1].len() {
        warn!(
            target: "fugu-tools",
            "Operand widths differ ({} vs {}); the gate combines the overlap",
            args.operands[0].len(),
            args.operands[1].len()
        );
    }

    let scaffold = build(&args, &config).unwrap_or_else(|e| {
        eprintln!("Failed to lay scaffold: {e}");
        process::exit(1);
    });

    let verbosity = args.verbosity.unwrap_or(config.scaffold.summary_verbosity);
    println!("{}", scaffold.summary(verbosity));

    if let Some(path) = &args.snapshot {
        let snapshot = scaffold.graph().to_snapshot(SnapshotMetadata {
            description: format!("{} gate", args.kind),
            source: "scaffold_report".to_string(),
            ..SnapshotMetadata::default()
        });
        if let Err(e) = save_snapshot(&snapshot, path) {
            eprintln!("Failed to write snapshot {}: {e}", path.display());
            process::exit(1);
        }
        info!(target: "fugu-tools", "Snapshot written to {}", path.display());
    }
}
