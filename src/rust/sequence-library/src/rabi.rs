// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use pulse_compiler::{ParameterSet, Result, SequenceBuilder, SequenceCatalog};
use pulse_program::OpCode;

pub fn register(catalog: &mut SequenceCatalog) {
    catalog.register("rabi", rabi_defaults, rabi);
}

pub fn rabi_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("pulsewidth", 100e-9)
        .with("tau", 1e-6)
}

/// Microwave drive pulse followed by a free-evolution interval.
pub fn rabi(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, params.get("pulsewidth")?)?;
    builder.add_instruction(&[], OpCode::Continue, 0, params.get("tau")?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testutil::compile;
    use pulse_program::OpCode;

    #[test]
    fn test_rabi_is_exactly_pulse_then_wait() {
        let compiled = compile("rabi", &[("pulsewidth", 20e-9), ("tau", 0.0)]);
        let program = compiled.program.instructions();
        assert_eq!(program.len(), 2);
        assert_eq!(program[0].opcode, OpCode::Continue);
        assert_eq!(program[0].flags, crate::testutil::mask("mw1"));
        assert_eq!(program[0].duration, 20e-9);
        assert_eq!(program[1].opcode, OpCode::Continue);
        assert_eq!(program[1].flags, 0);
        assert_eq!(program[1].duration, 0.0);
        assert!(compiled.waveforms.is_empty());
    }
}
