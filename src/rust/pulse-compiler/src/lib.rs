// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

pub mod builder;
pub mod catalog;
pub mod parameter_store;
pub mod waveform;

pub use builder::{CompiledSequence, SequenceBuilder};
pub use catalog::{BuildFn, DefaultsFn, SequenceCatalog, SequenceEntry};
pub use parameter_store::ParameterSet;
pub use waveform::{IqSample, WaveformTable};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Program(#[from] pulse_program::Error),
    #[error("sequence '{sequence}' references missing parameter '{name}'")]
    MissingParameter { sequence: String, name: String },
    #[error("parameter '{name}' of sequence '{sequence}' is not a valid count: {value}")]
    InvalidCount {
        sequence: String,
        name: String,
        value: f64,
    },
    #[error("no sequence registered under the name '{name}'")]
    UnknownSequence { name: String },
    #[error("AWG targets and IQ values differ in length ({targets} vs {values})")]
    AwgValueMismatch { targets: usize, values: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
