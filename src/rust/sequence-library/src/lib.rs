// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Catalog of NV-center pulse sequences.
//!
//! Each sequence module pairs a `<name>_defaults` function with a `<name>`
//! body function and registers both explicitly via [`install`]. Bodies may
//! compose by calling each other's build functions directly with the shared
//! builder and parameter set; defaults compose by layered construction.

pub mod coherence;
pub mod decoupling;
pub mod deer;
pub mod odmr;
pub mod rabi;
pub mod readout;

use pulse_compiler::SequenceCatalog;
use pulse_program::ChannelTable;

/// Register every sequence of the standard library into `catalog`.
pub fn install(catalog: &mut SequenceCatalog) {
    odmr::register(catalog);
    rabi::register(catalog);
    coherence::register(catalog);
    decoupling::register(catalog);
    deer::register(catalog);
    readout::register(catalog);
}

/// The fully populated standard catalog.
pub fn standard_catalog() -> SequenceCatalog {
    let mut catalog = SequenceCatalog::new();
    install(&mut catalog);
    catalog
}

/// The conventional wiring of an NV confocal setup; boards may override
/// this with their own configuration.
pub fn reference_channels() -> ChannelTable {
    let assignments = [
        ("green", 0u8),
        ("red", 1),
        ("yellow", 2),
        ("mw1", 3),
        ("mw2", 4),
        ("ctr0", 5),
        ("ctr1", 6),
        ("awg0", 7),
        ("awg1", 8),
    ];
    let mut table = ChannelTable::new();
    for (name, bit) in assignments {
        // The static table above cannot collide.
        table
            .assign(name, bit)
            .expect("Internal error: reference channel table is inconsistent");
    }
    table
}


#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pulse_program::DeviceKind;

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = standard_catalog();
        let names: Vec<&str> = catalog.names().collect();
        for expected in [
            "odmr",
            "odmr_pulsed",
            "rabi",
            "ramsey",
            "hahn_echo",
            "t1",
            "cpmg",
            "xy8",
            "deer",
            "charge_readout",
            "ple",
        ] {
            assert!(names.contains(&expected), "missing sequence {expected}");
        }
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let catalog = standard_catalog();
        let channels = reference_channels();
        let mut overrides = IndexMap::new();
        overrides.insert("n".to_string(), 4.0);
        overrides.insert("tau".to_string(), 2e-6);
        let first = catalog
            .compile("xy8", &overrides, &channels, DeviceKind::PulseBlasterEsrPro)
            .unwrap();
        let second = catalog
            .compile("xy8", &overrides, &channels, DeviceKind::PulseBlasterEsrPro)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.waveforms.fingerprint(),
            second.waveforms.fingerprint()
        );
    }

    #[test]
    fn test_every_sequence_compiles_with_defaults() {
        let catalog = standard_catalog();
        let channels = reference_channels();
        let overrides = IndexMap::new();
        for name in catalog.names() {
            let compiled = catalog
                .compile(name, &overrides, &channels, DeviceKind::PulseBlasterEsrPro)
                .unwrap_or_else(|err| panic!("sequence {name} failed: {err}"));
            assert!(!compiled.program.is_empty(), "sequence {name} is empty");
        }
    }

    #[test]
    fn test_usb_board_floor_rejects_short_pulses() {
        let catalog = standard_catalog();
        let channels = reference_channels();
        let mut overrides = IndexMap::new();
        overrides.insert("pulsewidth".to_string(), 20e-9);
        let err = catalog
            .compile("rabi", &overrides, &channels, DeviceKind::PulseBlasterUsb)
            .unwrap_err();
        assert!(matches!(
            err,
            pulse_compiler::Error::Program(pulse_program::Error::DurationTooShort {
                index: 0,
                ..
            })
        ));
    }
}
