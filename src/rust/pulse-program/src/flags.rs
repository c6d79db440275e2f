// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Mapping from symbolic channel names to hardware flag bits.
//!
//! Bit positions are assigned once, when the board configuration is loaded,
//! and stay stable for the lifetime of the process. A sequence referencing a
//! name that was never assigned must fail loudly: silently programming the
//! wrong output would produce wrong physics, not an error message.

use crate::{Error, Result};
use indexmap::IndexMap;

/// Channel-name to flag-bit table of one board configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelTable {
    bits: IndexMap<String, u8>,
}

impl ChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a configuration mapping, rejecting duplicate bits.
    pub fn from_map(map: IndexMap<String, u8>) -> Result<Self> {
        let mut table = Self::new();
        for (name, bit) in map {
            table.assign(&name, bit)?;
        }
        Ok(table)
    }

    /// Assign `bit` to `name`. Each name and each bit may appear only once.
    pub fn assign(&mut self, name: &str, bit: u8) -> Result<()> {
        for (other, assigned) in &self.bits {
            if *assigned == bit || other.as_str() == name {
                return Err(Error::DuplicateChannel {
                    name: name.to_string(),
                    existing: other.clone(),
                    bit,
                });
            }
        }
        self.bits.insert(name.to_string(), bit);
        Ok(())
    }

    /// Flag word of a single channel. The empty name maps to 0 (all low).
    pub fn mask(&self, name: &str) -> Result<u32> {
        if name.is_empty() {
            return Ok(0);
        }
        match self.bits.get(name) {
            Some(bit) => Ok(1u32 << bit),
            None => Err(Error::UnknownChannel {
                name: name.to_string(),
            }),
        }
    }

    /// OR the flag words of all given channels. Order-independent; the empty
    /// set resolves to 0.
    pub fn resolve<'a, I>(&self, names: I) -> Result<u32>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut flags = 0u32;
        for name in names {
            flags |= self.mask(name)?;
        }
        Ok(flags)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bits.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bits.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}
