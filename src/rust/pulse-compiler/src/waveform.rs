// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Per-AWG analog sample tables.
//!
//! Each AWG accumulates an ordered list of (I, Q, duration) samples during
//! one compile run. The table is owned by that run and handed to the AWG
//! upload collaborator together with the digital program.

use indexmap::IndexMap;
use num_complex::Complex64;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// One analog time slice: an (I, Q) pair held for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqSample {
    pub value: Complex64,
    pub duration: f64,
}

impl Serialize for IqSample {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("IqSample", 3)?;
        state.serialize_field("i", &self.value.re)?;
        state.serialize_field("q", &self.value.im)?;
        state.serialize_field("duration", &self.duration)?;
        state.end()
    }
}

/// Ordered waveform tables of one compile run, keyed by AWG id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveformTable {
    tables: IndexMap<String, Vec<IqSample>>,
}

impl Serialize for WaveformTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (awg, samples) in &self.tables {
            map.serialize_entry(awg, samples)?;
        }
        map.end()
    }
}

impl WaveformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to `awg`'s table and return its index within it.
    pub fn append(&mut self, awg: &str, value: Complex64, duration: f64) -> usize {
        let samples = self.tables.entry(awg.to_string()).or_default();
        samples.push(IqSample { value, duration });
        samples.len() - 1
    }

    pub fn table(&self, awg: &str) -> Option<&[IqSample]> {
        self.tables.get(awg).map(Vec::as_slice)
    }

    pub fn awg_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn sample_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn total_duration(&self, awg: &str) -> Option<f64> {
        self.tables
            .get(awg)
            .map(|samples| samples.iter().map(|sample| sample.duration).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Content hash of the whole table, usable as an upload-cache identity.
    ///
    /// Two compile runs with identical inputs produce identical fingerprints.
    pub fn fingerprint(&self) -> String {
        let serialized = serde_json::to_string(self)
            .expect("Internal error: waveform table serialization failed while fingerprinting");
        format!("{:x}", md5::compute(serialized.as_bytes()))
    }
}
