// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Shape of a LOOP/END_LOOP pairing violation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFault {
    #[error("LOOP is never closed by an END_LOOP")]
    OpenLoop,
    #[error("END_LOOP without an open LOOP")]
    StrayEndLoop,
    #[error("END_LOOP operand {operand} does not reference the innermost open LOOP at {expected}")]
    CrossedPair { operand: u32, expected: u32 },
}

/// Errors raised while building or validating a pulse program.
///
/// Every variant is fatal to the current compile run; nothing partially
/// built must reach the hardware upload path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown channel name '{name}'")]
    UnknownChannel { name: String },
    #[error("channel '{name}' conflicts with the existing assignment of '{existing}' (bit {bit})")]
    DuplicateChannel {
        name: String,
        existing: String,
        bit: u8,
    },
    #[error(
        "instruction {index}: duration {duration:e} s is below the device minimum of {minimum:e} s"
    )]
    DurationTooShort {
        index: usize,
        duration: f64,
        minimum: f64,
    },
    #[error("unbalanced loop at instruction {index}: {fault}")]
    UnbalancedLoop { index: usize, fault: LoopFault },
    #[error("BRANCH at instruction {index} targets {target}, which is not a prior instruction")]
    InvalidBranchTarget { index: usize, target: u32 },
    #[error("program holds {count} instructions but the device memory fits only {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
}
