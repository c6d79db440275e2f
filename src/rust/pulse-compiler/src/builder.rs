// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Digital and analog instruction emitters for one compile run.
//!
//! A [`SequenceBuilder`] owns the growing program and waveform table of
//! exactly one compilation. Sequence body functions call the emitters
//! repeatedly; [`SequenceBuilder::finalize`] validates the structural
//! invariants and releases the compiled output. On any error the builder is
//! dropped with its partial state, so an invalid program can never reach the
//! upload path.

use crate::waveform::WaveformTable;
use crate::{Error, Result};
use num_complex::Complex64;
use pulse_program::{ChannelTable, DeviceKind, Instruction, OpCode, Program};
use serde::Serialize;

/// Output of one successful compile run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledSequence {
    pub program: Program,
    pub waveforms: WaveformTable,
}

pub struct SequenceBuilder<'a> {
    channels: &'a ChannelTable,
    device: DeviceKind,
    program: Program,
    waveforms: WaveformTable,
}

impl<'a> SequenceBuilder<'a> {
    pub fn new(channels: &'a ChannelTable, device: DeviceKind) -> Self {
        Self {
            channels,
            device,
            program: Program::new(),
            waveforms: WaveformTable::new(),
        }
    }

    pub fn device(&self) -> DeviceKind {
        self.device
    }

    pub fn channels(&self) -> &ChannelTable {
        self.channels
    }

    /// Number of digital instructions emitted so far.
    pub fn instruction_count(&self) -> usize {
        self.program.len()
    }

    /// Resolve `channels`, append one digital instruction, return its index.
    ///
    /// The returned index is what a LOOP caller passes back as the operand
    /// of its END_LOOP. Durations must be zero (idle placeholder) or at
    /// least the device minimum; anything in between is rejected here, at
    /// the offending instruction, rather than on the board.
    pub fn add_instruction(
        &mut self,
        channels: &[&str],
        opcode: OpCode,
        operand: u32,
        duration: f64,
    ) -> Result<usize> {
        let flags = self.channels.resolve(channels.iter().copied())?;
        let minimum = self.device.traits().min_instruction;
        if duration != 0.0 && duration < minimum {
            return Err(pulse_program::Error::DurationTooShort {
                index: self.program.len(),
                duration,
                minimum,
            }
            .into());
        }
        Ok(self.program.push(Instruction {
            flags,
            opcode,
            operand,
            duration,
        }))
    }

    /// Append one analog time slice, one (I, Q) value per listed AWG.
    ///
    /// Listing several AWGs drives them with independent values in the same
    /// slice (dual-spin DEER). Unless `awg_only` is set, a matching digital
    /// CONTINUE instruction is emitted as well, raising `customflags` if
    /// given and otherwise the AWGs' own trigger bits; the digital index is
    /// returned. With `awg_only` only the waveform table grows (the
    /// pre-pass pattern for loop-folded trains) and the index of the last
    /// appended sample is returned.
    pub fn add_awg_instruction(
        &mut self,
        awg_ids: &[&str],
        values: &[Complex64],
        duration: f64,
        customflags: Option<&[&str]>,
        awg_only: bool,
    ) -> Result<usize> {
        if awg_ids.len() != values.len() {
            return Err(Error::AwgValueMismatch {
                targets: awg_ids.len(),
                values: values.len(),
            });
        }
        let mut slot = 0;
        for (awg, value) in awg_ids.iter().zip(values) {
            slot = self.waveforms.append(awg, *value, duration);
        }
        if awg_only {
            return Ok(slot);
        }
        match customflags {
            Some(flags) => self.add_instruction(flags, OpCode::Continue, 0, duration),
            None => self.add_instruction(awg_ids, OpCode::Continue, 0, duration),
        }
    }

    /// Validate the program and release the compiled output.
    pub fn finalize(self) -> Result<CompiledSequence> {
        self.program.validate(self.device.traits())?;
        Ok(CompiledSequence {
            program: self.program,
            waveforms: self.waveforms,
        })
    }
}
