// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Registry pairing sequence names with their defaults and body functions.
//!
//! Registration is explicit: each sequence module hands its
//! (name, defaults, body) triple to [`SequenceCatalog::register`] at startup.
//! The catalog is populated once and read-only afterwards; a compile run
//! looks its entry up by name.

use crate::builder::{CompiledSequence, SequenceBuilder};
use crate::parameter_store::ParameterSet;
use crate::{Error, Result};
use indexmap::IndexMap;
use log::warn;
use pulse_program::{ChannelTable, DeviceKind};

/// Produces a sequence's default parameters.
pub type DefaultsFn = fn() -> ParameterSet;

/// Emits a sequence's instructions against the resolved parameters.
pub type BuildFn = fn(&mut SequenceBuilder, &ParameterSet) -> Result<()>;

pub struct SequenceEntry {
    name: String,
    defaults: DefaultsFn,
    build: BuildFn,
}

impl SequenceEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn defaults(&self) -> ParameterSet {
        (self.defaults)()
    }
}

#[derive(Default)]
pub struct SequenceCatalog {
    entries: IndexMap<String, SequenceEntry>,
}

impl SequenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence. The first registration of a name wins; a
    /// duplicate is dropped with a warning, since sequence families may
    /// deliberately share composition helpers under one name.
    pub fn register(&mut self, name: &str, defaults: DefaultsFn, build: BuildFn) {
        if self.entries.contains_key(name) {
            warn!("sequence '{name}' is already registered, keeping the first definition");
            return;
        }
        self.entries.insert(
            name.to_string(),
            SequenceEntry {
                name: name.to_string(),
                defaults,
                build,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&SequenceEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a sequence's defaults with user overrides (overrides win).
    pub fn resolve_parameters(
        &self,
        name: &str,
        overrides: &IndexMap<String, f64>,
    ) -> Result<ParameterSet> {
        let entry = self.entries.get(name).ok_or_else(|| Error::UnknownSequence {
            name: name.to_string(),
        })?;
        let mut params = (entry.defaults)();
        for (key, value) in overrides {
            params.set(key, *value);
        }
        params.set_sequence(name);
        Ok(params)
    }

    /// Run one full compilation: resolve parameters, run the body against a
    /// fresh builder, validate and release the output. Any error discards
    /// the partially built program.
    pub fn compile(
        &self,
        name: &str,
        overrides: &IndexMap<String, f64>,
        channels: &ChannelTable,
        device: DeviceKind,
    ) -> Result<CompiledSequence> {
        let params = self.resolve_parameters(name, overrides)?;
        let entry = &self.entries[name];
        let mut builder = SequenceBuilder::new(channels, device);
        (entry.build)(&mut builder, &params)?;
        builder.finalize()
    }
}
