// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Linear instruction program with structural validation.
//!
//! The program is append-only while a sequence body runs; the structural
//! invariants (loop pairing, branch targets, memory capacity) are checked in
//! one pass before the program may leave the compiler.

use crate::device_traits::BoardTraits;
use crate::errors::LoopFault;
use crate::instruction::{Instruction, OpCode};
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instruction and return its index.
    pub fn push(&mut self, instruction: Instruction) -> usize {
        self.instructions.push(instruction);
        self.instructions.len() - 1
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Check the structural invariants against the target device.
    ///
    /// LOOP/END_LOOP pairs must nest strictly (LIFO), with every END_LOOP
    /// operand naming the index of the innermost open LOOP. BRANCH operands
    /// must point at a prior instruction. The instruction count must fit the
    /// device memory.
    pub fn validate(&self, traits: &BoardTraits) -> Result<()> {
        if self.instructions.len() > traits.max_instructions {
            return Err(Error::CapacityExceeded {
                count: self.instructions.len(),
                capacity: traits.max_instructions,
            });
        }
        let mut open_loops: Vec<usize> = Vec::new();
        for (index, instruction) in self.instructions.iter().enumerate() {
            match instruction.opcode {
                OpCode::Loop => open_loops.push(index),
                OpCode::EndLoop => match open_loops.pop() {
                    None => {
                        return Err(Error::UnbalancedLoop {
                            index,
                            fault: LoopFault::StrayEndLoop,
                        });
                    }
                    Some(loop_index) => {
                        if instruction.operand as usize != loop_index {
                            return Err(Error::UnbalancedLoop {
                                index,
                                fault: LoopFault::CrossedPair {
                                    operand: instruction.operand,
                                    expected: loop_index as u32,
                                },
                            });
                        }
                    }
                },
                OpCode::Branch => {
                    if instruction.operand as usize > index {
                        return Err(Error::InvalidBranchTarget {
                            index,
                            target: instruction.operand,
                        });
                    }
                }
                _ => {}
            }
        }
        if let Some(loop_index) = open_loops.pop() {
            return Err(Error::UnbalancedLoop {
                index: loop_index,
                fault: LoopFault::OpenLoop,
            });
        }
        Ok(())
    }

    /// Total run time of one pass through the program, in seconds, with loop
    /// bodies counted once per iteration (nested loops multiply).
    ///
    /// Assumes a validated program; unmatched END_LOOPs are counted with
    /// multiplicity 1.
    pub fn total_duration(&self) -> f64 {
        let mut total = 0.0;
        let mut multiplier = 1.0;
        let mut counts: Vec<u32> = Vec::new();
        for instruction in &self.instructions {
            match instruction.opcode {
                OpCode::Loop => {
                    multiplier *= f64::from(instruction.operand);
                    counts.push(instruction.operand);
                    total += instruction.duration * multiplier;
                }
                OpCode::EndLoop => {
                    total += instruction.duration * multiplier;
                    if let Some(count) = counts.pop() {
                        multiplier /= f64::from(count);
                    }
                }
                _ => total += instruction.duration * multiplier,
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_traits::PULSE_BLASTER_ESR_PRO_TRAITS;

    fn inst(opcode: OpCode, operand: u32, duration: f64) -> Instruction {
        Instruction {
            flags: 0,
            opcode,
            operand,
            duration,
        }
    }

    #[test]
    fn test_validate_accepts_nested_loops() {
        let mut program = Program::new();
        let outer = program.push(inst(OpCode::Loop, 10, 1e-6));
        let inner = program.push(inst(OpCode::Loop, 4, 1e-6));
        program.push(inst(OpCode::Continue, 0, 1e-6));
        program.push(inst(OpCode::EndLoop, inner as u32, 1e-6));
        program.push(inst(OpCode::EndLoop, outer as u32, 1e-6));
        program.validate(&PULSE_BLASTER_ESR_PRO_TRAITS).unwrap();
    }

    #[test]
    fn test_validate_rejects_stray_end_loop() {
        let mut program = Program::new();
        program.push(inst(OpCode::Continue, 0, 1e-6));
        program.push(inst(OpCode::EndLoop, 0, 1e-6));
        let err = program
            .validate(&PULSE_BLASTER_ESR_PRO_TRAITS)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnbalancedLoop {
                index: 1,
                fault: LoopFault::StrayEndLoop
            }
        );
    }

    #[test]
    fn test_validate_rejects_open_loop() {
        let mut program = Program::new();
        program.push(inst(OpCode::Loop, 10, 1e-6));
        program.push(inst(OpCode::Continue, 0, 1e-6));
        let err = program
            .validate(&PULSE_BLASTER_ESR_PRO_TRAITS)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnbalancedLoop {
                index: 0,
                fault: LoopFault::OpenLoop
            }
        );
    }

    #[test]
    fn test_validate_rejects_interleaved_pairs() {
        // END_LOOP at 3 closes the inner loop (index 1) but names the outer.
        let mut program = Program::new();
        program.push(inst(OpCode::Loop, 2, 1e-6));
        program.push(inst(OpCode::Loop, 3, 1e-6));
        program.push(inst(OpCode::Continue, 0, 1e-6));
        program.push(inst(OpCode::EndLoop, 0, 1e-6));
        program.push(inst(OpCode::EndLoop, 1, 1e-6));
        let err = program
            .validate(&PULSE_BLASTER_ESR_PRO_TRAITS)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnbalancedLoop {
                index: 3,
                fault: LoopFault::CrossedPair {
                    operand: 0,
                    expected: 1
                }
            }
        );
    }

    #[test]
    fn test_validate_rejects_forward_branch() {
        let mut program = Program::new();
        program.push(inst(OpCode::Continue, 0, 1e-6));
        program.push(inst(OpCode::Branch, 5, 1e-6));
        let err = program
            .validate(&PULSE_BLASTER_ESR_PRO_TRAITS)
            .unwrap_err();
        assert_eq!(err, Error::InvalidBranchTarget { index: 1, target: 5 });
    }

    #[test]
    fn test_validate_accepts_branch_to_start() {
        let mut program = Program::new();
        program.push(inst(OpCode::Continue, 0, 1e-6));
        program.push(inst(OpCode::Branch, 0, 1e-6));
        program.validate(&PULSE_BLASTER_ESR_PRO_TRAITS).unwrap();
    }

    #[test]
    fn test_validate_rejects_capacity_overflow() {
        let mut program = Program::new();
        for _ in 0..PULSE_BLASTER_ESR_PRO_TRAITS.max_instructions + 1 {
            program.push(inst(OpCode::Continue, 0, 1e-6));
        }
        let err = program
            .validate(&PULSE_BLASTER_ESR_PRO_TRAITS)
            .unwrap_err();
        assert_eq!(
            err,
            Error::CapacityExceeded {
                count: 4097,
                capacity: 4096
            }
        );
    }

    #[test]
    fn test_total_duration_expands_loops() {
        // LOOP(3) { 1 us header, 2 us body, 1 us footer } + 5 us tail:
        // 3 * (1 + 2 + 1) + 5 = 17 us.
        let mut program = Program::new();
        let loop_index = program.push(inst(OpCode::Loop, 3, 1e-6));
        program.push(inst(OpCode::Continue, 0, 2e-6));
        program.push(inst(OpCode::EndLoop, loop_index as u32, 1e-6));
        program.push(inst(OpCode::Continue, 0, 5e-6));
        assert!((program.total_duration() - 17e-6).abs() < 1e-9);
    }

    #[test]
    fn test_total_duration_nested_loops_multiply() {
        let mut program = Program::new();
        let outer = program.push(inst(OpCode::Loop, 2, 0.0));
        let inner = program.push(inst(OpCode::Loop, 5, 0.0));
        program.push(inst(OpCode::Continue, 0, 1e-6));
        program.push(inst(OpCode::EndLoop, inner as u32, 0.0));
        program.push(inst(OpCode::EndLoop, outer as u32, 0.0));
        assert!((program.total_duration() - 10e-6).abs() < 1e-9);
    }
}
