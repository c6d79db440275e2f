// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use num_complex::Complex64;
use pulse_compiler::{ParameterSet, Result, SequenceBuilder, SequenceCatalog};
use pulse_program::OpCode;

pub fn register(catalog: &mut SequenceCatalog) {
    catalog.register("deer", deer_defaults, deer);
}

pub fn deer_defaults() -> ParameterSet {
    ParameterSet::new()
        .with("pihalf", 50e-9)
        .with("pi", 100e-9)
        .with("tau", 1e-6)
        .with("pump_phase", std::f64::consts::FRAC_PI_2)
        .with("invert", 0.0)
}

/// Double electron-electron resonance: a Hahn echo on the NV spin (awg0)
/// with a recoupling pi pulse on the dark spin (awg1) in the same time
/// slice as the NV refocusing pulse. Every NV pulse raises the microwave
/// switch gate (`mw2`) alongside its AWG trigger via customflags.
pub fn deer(builder: &mut SequenceBuilder, params: &ParameterSet) -> Result<()> {
    let pihalf = params.get("pihalf")?;
    let tau = params.get("tau")?;
    let pump_phase = params.get("pump_phase")?;
    let x = Complex64::new(1.0, 0.0);
    let pump = Complex64::new(pump_phase.cos(), pump_phase.sin());

    builder.add_awg_instruction(&["awg0"], &[x], pihalf, Some(&["awg0", "mw2"]), false)?;
    builder.add_instruction(&[], OpCode::Continue, 0, tau)?;
    builder.add_awg_instruction(
        &["awg0", "awg1"],
        &[x, pump],
        params.get("pi")?,
        Some(&["awg0", "awg1", "mw2"]),
        false,
    )?;
    builder.add_instruction(&[], OpCode::Continue, 0, tau)?;
    let readout = if params.get("invert")? != 0.0 { -x } else { x };
    builder.add_awg_instruction(&["awg0"], &[readout], pihalf, Some(&["awg0", "mw2"]), false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testutil::{compile, mask};
    use num_complex::Complex64;

    #[test]
    fn test_deer_drives_both_awgs_in_one_slice() {
        let compiled = compile("deer", &[]);
        assert_eq!(compiled.program.len(), 5);
        // Refocusing slice: both triggers plus the switch gate.
        assert_eq!(
            compiled.program.get(2).unwrap().flags,
            mask("awg0") | mask("awg1") | mask("mw2")
        );
        assert_eq!(compiled.waveforms.table("awg0").unwrap().len(), 3);
        let pump = compiled.waveforms.table("awg1").unwrap();
        assert_eq!(pump.len(), 1);
        assert!((pump[0].value - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_deer_invert_flips_only_the_readout() {
        let compiled = compile("deer", &[("invert", 1.0)]);
        let nv = compiled.waveforms.table("awg0").unwrap();
        assert_eq!(nv[0].value, Complex64::new(1.0, 0.0));
        assert_eq!(nv[2].value, Complex64::new(-1.0, 0.0));
    }
}
