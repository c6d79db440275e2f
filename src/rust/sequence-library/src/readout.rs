// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Charge-state readout and resonant excitation (PLE).

use pulse_compiler::{ParameterSet, Result, SequenceBuilder, SequenceCatalog};
use pulse_program::OpCode;

pub fn register(catalog: &mut SequenceCatalog) {
    catalog.register("charge_readout", charge_readout_defaults, charge_readout);
    catalog.register("ple", ple_defaults, ple);
}

pub fn charge_readout_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("init_time", 1e-6)
        .with("wait_time", 1e-6)
        .with("readout_time", 10e-3)
}

/// NV charge-state readout: green initialization, a dark interval, then a
/// long weak yellow readout under the counter gate.
pub fn charge_readout(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    builder.add_instruction(&["green"], OpCode::Continue, 0, params.get("init_time")?)?;
    builder.add_instruction(&[], OpCode::Continue, 0, params.get("wait_time")?)?;
    builder.add_instruction(
        &["yellow", "ctr0"],
        OpCode::Continue,
        0,
        params.get("readout_time")?,
    )?;
    Ok(())
}

pub fn ple_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("repump_time", 10e-6)
        .with("scan_time", 1e-3)
        .with("settle_time", 1e-6)
}

/// Photoluminescence excitation: green repump, resonant red excitation
/// under the counter gate, repeated until externally stopped.
pub fn ple(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    builder.add_instruction(&["green"], OpCode::Continue, 0, params.get("repump_time")?)?;
    builder.add_instruction(
        &["red", "ctr0"],
        OpCode::Continue,
        0,
        params.get("scan_time")?,
    )?;
    builder.add_instruction(&[], OpCode::Branch, 0, params.get("settle_time")?)?;
    Ok(())
}
