// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Free-evolution coherence measurements: Ramsey, Hahn echo and T1.

use pulse_compiler::{ParameterSet, Result, SequenceBuilder, SequenceCatalog};
use pulse_program::OpCode;

pub fn register(catalog: &mut SequenceCatalog) {
    catalog.register("ramsey", ramsey_defaults, ramsey);
    catalog.register("hahn_echo", hahn_echo_defaults, hahn_echo);
    catalog.register("t1", t1_defaults, t1);
}

pub fn ramsey_defaults() -> ParameterSet {
    ParameterSet::new().with("pihalf", 50e-9).with("tau", 1e-6)
}

/// Ramsey fringe: pi/2 - tau - pi/2.
pub fn ramsey(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    let pihalf = params.get("pihalf")?;
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, pihalf)?;
    builder.add_instruction(&[], OpCode::Continue, 0, params.get("tau")?)?;
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, pihalf)?;
    Ok(())
}

pub fn hahn_echo_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("pihalf", 50e-9)
        .with("pi", 100e-9)
        .with("tau", 1e-6)
}

/// Hahn echo: pi/2 - tau - pi - tau - pi/2.
pub fn hahn_echo(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    let pihalf = params.get("pihalf")?;
    let tau = params.get("tau")?;
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, pihalf)?;
    builder.add_instruction(&[], OpCode::Continue, 0, tau)?;
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, params.get("pi")?)?;
    builder.add_instruction(&[], OpCode::Continue, 0, tau)?;
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, pihalf)?;
    Ok(())
}

pub fn t1_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("init_time", 3e-6)
        .with("tau", 10e-6)
        .with("readout_time", 300e-9)
}

/// Longitudinal relaxation: polarize, wait in the dark, read out.
pub fn t1(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    builder.add_instruction(&["green"], OpCode::Continue, 0, params.get("init_time")?)?;
    builder.add_instruction(&[], OpCode::Continue, 0, params.get("tau")?)?;
    builder.add_instruction(
        &["green", "ctr0"],
        OpCode::Continue,
        0,
        params.get("readout_time")?,
    )?;
    Ok(())
}
