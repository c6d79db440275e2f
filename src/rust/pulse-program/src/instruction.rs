// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::fmt;

/// Operation codes understood by PulseBlaster-class timing generators.
///
/// The numeric encoding follows the board's instruction memory layout and
/// must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpCode {
    /// Execute the instruction and fall through to the next one.
    Continue,
    /// Halt the board.
    Stop,
    /// Begin a loop body; the operand is the repeat count.
    Loop,
    /// Close a loop body; the operand is the index of the matching LOOP.
    EndLoop,
    /// Subroutine call; the operand is the subroutine's first instruction.
    Jsr,
    /// Return from subroutine.
    Rts,
    /// Unconditional jump to the operand instruction index.
    Branch,
    /// Extended-duration delay; the operand multiplies the duration field.
    LongDelay,
    /// Suspend until the board receives an external trigger.
    Wait,
    /// Return from interrupt.
    Rti,
}

impl OpCode {
    /// Numeric encoding written into the board's instruction word.
    pub fn code(self) -> u8 {
        match self {
            OpCode::Continue => 0,
            OpCode::Stop => 1,
            OpCode::Loop => 2,
            OpCode::EndLoop => 3,
            OpCode::Jsr => 4,
            OpCode::Rts => 5,
            OpCode::Branch => 6,
            OpCode::LongDelay => 7,
            OpCode::Wait => 8,
            OpCode::Rti => 9,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpCode::Continue => "CONTINUE",
            OpCode::Stop => "STOP",
            OpCode::Loop => "LOOP",
            OpCode::EndLoop => "END_LOOP",
            OpCode::Jsr => "JSR",
            OpCode::Rts => "RTS",
            OpCode::Branch => "BRANCH",
            OpCode::LongDelay => "LONG_DELAY",
            OpCode::Wait => "WAIT",
            OpCode::Rti => "RTI",
        };
        write!(f, "{name}")
    }
}

/// One slot of the board's instruction memory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Instruction {
    /// Output flag word; one bit per digital channel.
    pub flags: u32,
    pub opcode: OpCode,
    /// Loop count, branch target or subroutine address, depending on the opcode.
    pub operand: u32,
    /// Duration in seconds.
    pub duration: f64,
}
