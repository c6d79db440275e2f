// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Batch/diagnostic front end for the sequence compiler: list the catalog,
//! inspect resolved parameters, or compile a sequence against a board
//! configuration and print what would be uploaded.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use pulse_compiler::CompiledSequence;
use pulse_program::{ChannelTable, DeviceKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sequencer", about = "Compile NV pulse sequences for inspection")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered sequences
    List,
    /// Show the resolved parameters of a sequence
    Show {
        sequence: String,
        /// Parameter overrides, repeatable
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// Compile a sequence and print the program and waveform tables
    Compile {
        sequence: String,
        /// Parameter overrides, repeatable
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Board configuration file (JSON); defaults to the reference setup
        #[arg(long)]
        board: Option<PathBuf>,
        /// Emit the compiled output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// On-disk board description: target device plus channel-to-bit wiring.
#[derive(Deserialize)]
struct BoardConfig {
    device: DeviceKind,
    channels: IndexMap<String, u8>,
}

fn load_board(path: Option<&Path>) -> anyhow::Result<(ChannelTable, DeviceKind)> {
    let Some(path) = path else {
        return Ok((
            sequence_library::reference_channels(),
            DeviceKind::PulseBlasterEsrPro,
        ));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read board configuration {}", path.display()))?;
    let config: BoardConfig =
        serde_json::from_str(&text).context("failed to parse board configuration")?;
    let channels = ChannelTable::from_map(config.channels)?;
    Ok((channels, config.device))
}

fn parse_overrides(specs: &[String]) -> anyhow::Result<IndexMap<String, f64>> {
    let mut overrides = IndexMap::new();
    for spec in specs {
        let (key, value) = spec
            .split_once('=')
            .with_context(|| format!("override '{spec}' is not of the form KEY=VALUE"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("override '{spec}' has a non-numeric value"))?;
        overrides.insert(key.to_string(), value);
    }
    Ok(overrides)
}

fn print_compiled(compiled: &CompiledSequence) {
    println!(
        "{:>4}  {:>10}  {:<10}  {:>7}  duration [s]",
        "idx", "flags", "opcode", "operand"
    );
    for (index, instruction) in compiled.program.instructions().iter().enumerate() {
        println!(
            "{index:>4}  {:#010x}  {:<10}  {:>7}  {:.9}",
            instruction.flags,
            instruction.opcode.to_string(),
            instruction.operand,
            instruction.duration
        );
    }
    println!("total duration: {:.9} s", compiled.program.total_duration());
    for awg in compiled.waveforms.awg_ids() {
        let samples = compiled.waveforms.table(awg).map_or(0, <[_]>::len);
        let duration = compiled.waveforms.total_duration(awg).unwrap_or(0.0);
        println!("{awg}: {samples} samples, {duration:.9} s");
    }
    if !compiled.waveforms.is_empty() {
        println!("waveform fingerprint: {}", compiled.waveforms.fingerprint());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let catalog = sequence_library::standard_catalog();

    match cli.command {
        Command::List => {
            for name in catalog.names() {
                println!("{name}");
            }
        }
        Command::Show { sequence, set } => {
            let overrides = parse_overrides(&set)?;
            let params = catalog
                .resolve_parameters(&sequence, &overrides)
                .with_context(|| format!("cannot resolve parameters of '{sequence}'"))?;
            for (name, value) in params.iter() {
                println!("{name} = {value:e}");
            }
        }
        Command::Compile {
            sequence,
            set,
            board,
            json,
        } => {
            let overrides = parse_overrides(&set)?;
            let (channels, device) = load_board(board.as_deref())?;
            let compiled = catalog
                .compile(&sequence, &overrides, &channels, device)
                .with_context(|| format!("compilation of '{sequence}' failed"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&compiled)?);
            } else {
                print_compiled(&compiled);
            }
        }
    }
    Ok(())
}
