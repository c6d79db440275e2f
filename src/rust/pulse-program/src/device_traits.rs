// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

/// Device specific constraints for program generation.
///
/// The durations are in seconds. `min_instruction` is the shortest interval
/// the sequencer core can time; shorter (non-zero) instructions must be
/// rejected at compile time rather than silently clamped on the board.
pub struct BoardTraits {
    pub clock_hz: f64,
    pub min_instruction: f64,
    pub max_instructions: usize,
    pub flag_count: u8,
}

pub const PULSE_BLASTER_USB_TRAITS: BoardTraits = BoardTraits {
    clock_hz: 100e6,
    min_instruction: 50e-9,
    max_instructions: 4096,
    flag_count: 24,
};

pub const PULSE_BLASTER_ESR_PRO_TRAITS: BoardTraits = BoardTraits {
    clock_hz: 500e6,
    min_instruction: 10e-9,
    max_instructions: 4096,
    flag_count: 21,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    PulseBlasterUsb,
    PulseBlasterEsrPro,
}

impl DeviceKind {
    pub fn traits(&self) -> &'static BoardTraits {
        match self {
            DeviceKind::PulseBlasterUsb => &PULSE_BLASTER_USB_TRAITS,
            DeviceKind::PulseBlasterEsrPro => &PULSE_BLASTER_ESR_PRO_TRAITS,
        }
    }
}
