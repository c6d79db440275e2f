// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::rabi;
use pulse_compiler::{ParameterSet, Result, SequenceBuilder, SequenceCatalog};
use pulse_program::OpCode;

pub fn register(catalog: &mut SequenceCatalog) {
    catalog.register("odmr", odmr_defaults, odmr);
    catalog.register("odmr_pulsed", odmr_pulsed_defaults, odmr_pulsed);
}

pub fn odmr_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("count_time", 1e-3)
        .with("settle_time", 1e-6)
}

/// CW ODMR: laser and microwave on while the counter gate is open, then a
/// settle interval before branching back to the start. Runs until the board
/// is stopped externally.
pub fn odmr(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    builder.add_instruction(
        &["green", "mw1", "ctr0"],
        OpCode::Continue,
        0,
        params.get("count_time")?,
    )?;
    builder.add_instruction(&["green"], OpCode::Branch, 0, params.get("settle_time")?)?;
    Ok(())
}

pub fn odmr_pulsed_defaults() -> ParameterSet {
    rabi::rabi_defaults()
        .with("tau", 0.0)
        .with("init_time", 3e-6)
        .with("readout_time", 300e-9)
}

/// Pulsed ODMR: laser initialization, a fixed microwave pulse (the `rabi`
/// body with `tau` pinned to zero) and gated readout.
pub fn odmr_pulsed(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    builder.add_instruction(&["green"], OpCode::Continue, 0, params.get("init_time")?)?;
    rabi::rabi(builder, params)?;
    builder.add_instruction(
        &["green", "ctr0"],
        OpCode::Continue,
        0,
        params.get("readout_time")?,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testutil::{compile, mask};
    use pulse_program::OpCode;

    #[test]
    fn test_odmr_repeats_forever_via_branch_to_start() {
        let compiled = compile("odmr", &[]);
        let program = compiled.program.instructions();
        assert_eq!(program.len(), 2);
        assert_eq!(
            program[0].flags,
            mask("green") | mask("mw1") | mask("ctr0")
        );
        assert_eq!(program[1].opcode, OpCode::Branch);
        assert_eq!(program[1].operand, 0);
    }

    #[test]
    fn test_odmr_pulsed_wraps_the_rabi_body() {
        let compiled = compile("odmr_pulsed", &[("pulsewidth", 120e-9)]);
        let program = compiled.program.instructions();
        assert_eq!(program.len(), 4);
        assert_eq!(program[0].flags, mask("green"));
        assert_eq!(program[1].flags, mask("mw1"));
        assert_eq!(program[1].duration, 120e-9);
        assert_eq!(program[2].duration, 0.0);
        assert_eq!(program[3].flags, mask("green") | mask("ctr0"));
    }
}
