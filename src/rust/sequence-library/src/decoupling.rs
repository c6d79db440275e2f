// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Multipulse dynamical decoupling: CPMG and XY8.
//!
//! CPMG is emitted fully unrolled into the digital program, so its
//! instruction count grows linearly with the pulse number. XY8 needs
//! per-pulse phase control and therefore runs on the AWG: the analog
//! pre-pass writes the whole unrolled train into the waveform table while
//! the digital program folds the train into a single hardware loop over one
//! delay/trigger/delay block, keeping the instruction count constant in `n`.

use num_complex::Complex64;
use pulse_compiler::{ParameterSet, Result, SequenceBuilder, SequenceCatalog};
use pulse_program::OpCode;

pub fn register(catalog: &mut SequenceCatalog) {
    catalog.register("cpmg", cpmg_defaults, cpmg);
    catalog.register("xy8", xy8_defaults, xy8);
}

/// Timing defaults shared by the decoupling family; each sequence layers
/// its own keys on top.
fn decoupling_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("pihalf", 50e-9)
        .with("pi", 100e-9)
        .with("tau", 1e-6)
}

pub fn cpmg_defaults() -> ParameterSet {
    decoupling_defaults().with("n", 3.0)
}

/// CPMG train: initial pi/2, then n repetitions of (free evolution, pi
/// pulse), then the final pi/2.
pub fn cpmg(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    let n = params.get_count("n")?;
    let tau = params.get("tau")?;
    let pi = params.get("pi")?;
    let pihalf = params.get("pihalf")?;
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, pihalf)?;
    for _ in 0..n {
        builder.add_instruction(&[], OpCode::Continue, 0, tau)?;
        builder.add_instruction(&["mw1"], OpCode::Continue, 0, pi)?;
    }
    builder.add_instruction(&["mw1"], OpCode::Continue, 0, pihalf)?;
    Ok(())
}

pub fn xy8_defaults() -> ParameterSet {
    decoupling_defaults().with("n", 8.0).with("invert", 0.0)
}

/// XY8 phase pattern of one block, as AWG (I, Q) values.
fn xy8_phases() -> [Complex64; 8] {
    let x = Complex64::new(1.0, 0.0);
    let y = Complex64::new(0.0, 1.0);
    [x, y, x, y, y, x, y, x]
}

/// XY8-n with the analog pre-pass (see the module doc). With `invert` set,
/// the final pi/2 is played with negated (I, Q) to read out the
/// complementary state.
pub fn xy8(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    let n = params.get_count("n")?;
    let tau = params.get("tau")?;
    let pi = params.get("pi")?;
    let pihalf = params.get("pihalf")?;
    let half_tau = tau / 2.0;
    let phases = xy8_phases();
    let x = Complex64::new(1.0, 0.0);
    let pulses = 8 * n;

    builder.add_awg_instruction(&["awg0"], &[x], pihalf, None, false)?;

    // Pre-pass: the full train goes into the waveform table only; the
    // digital program steps through it with one trigger per loop pass.
    for k in 0..pulses {
        builder.add_awg_instruction(&["awg0"], &[phases[k % 8]], pi, None, true)?;
    }

    let loop_index = builder.add_instruction(&[], OpCode::Loop, pulses as u32, half_tau)?;
    builder.add_instruction(&["awg0"], OpCode::Continue, 0, pi)?;
    builder.add_instruction(&[], OpCode::EndLoop, loop_index as u32, half_tau)?;

    let readout = if params.get("invert")? != 0.0 { -x } else { x };
    builder.add_awg_instruction(&["awg0"], &[readout], pihalf, None, false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testutil::{compile, mask};
    use num_complex::Complex64;
    use pulse_program::OpCode;

    #[test]
    fn test_cpmg_instruction_count_is_linear_in_n() {
        let compiled = compile("cpmg", &[("n", 3.0)]);
        assert_eq!(compiled.program.len(), 8);
        let program = compiled.program.instructions();
        assert_eq!(program[0].flags, mask("mw1"));
        assert_eq!(program[7].flags, mask("mw1"));
        for pair in 0..3 {
            assert_eq!(program[1 + 2 * pair].flags, 0);
            assert_eq!(program[2 + 2 * pair].flags, mask("mw1"));
        }
        assert_eq!(compile("cpmg", &[("n", 10.0)]).program.len(), 22);
    }

    #[test]
    fn test_xy8_digital_count_is_constant_in_n() {
        let small = compile("xy8", &[("n", 2.0)]);
        let large = compile("xy8", &[("n", 16.0)]);
        assert_eq!(small.program.len(), large.program.len());
        // The analog table still holds the full unrolled train.
        assert_eq!(small.waveforms.table("awg0").unwrap().len(), 8 * 2 + 2);
        assert_eq!(large.waveforms.table("awg0").unwrap().len(), 8 * 16 + 2);
    }

    #[test]
    fn test_xy8_loop_covers_the_whole_train() {
        let compiled = compile("xy8", &[("n", 4.0)]);
        let program = compiled.program.instructions();
        let loop_instruction = program
            .iter()
            .find(|instruction| instruction.opcode == OpCode::Loop)
            .unwrap();
        assert_eq!(loop_instruction.operand, 32);
        let expected = 2.0 * 50e-9 + 32.0 * (1e-6 + 100e-9);
        assert!((compiled.program.total_duration() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_xy8_invert_negates_the_readout_pulse() {
        let plain = compile("xy8", &[("n", 1.0)]);
        let inverted = compile("xy8", &[("n", 1.0), ("invert", 1.0)]);
        let last_plain = *plain.waveforms.table("awg0").unwrap().last().unwrap();
        let last_inverted = *inverted.waveforms.table("awg0").unwrap().last().unwrap();
        assert_eq!(last_plain.value, Complex64::new(1.0, 0.0));
        assert_eq!(last_inverted.value, Complex64::new(-1.0, 0.0));
    }
}
