// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

pub mod device_traits;
mod errors;
pub mod flags;
pub mod instruction;
pub mod program;

pub use device_traits::{BoardTraits, DeviceKind};
pub use errors::{Error, LoopFault};
pub use flags::ChannelTable;
pub use instruction::{Instruction, OpCode};
pub use program::Program;

pub type Result<T, E = Error> = std::result::Result<T, E>;
