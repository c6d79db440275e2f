// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::{Error, Result};
use indexmap::IndexMap;

/// Resolved parameters of one compile run.
///
/// A sequence's defaults function builds the base set with [`ParameterSet::with`];
/// user overrides are applied key-by-key on top (overrides win). Keys are not
/// validated against the body function's usage: an extra key is carried and
/// simply unused, a missing key surfaces as [`Error::MissingParameter`] only
/// when the body dereferences it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    sequence: String,
    values: IndexMap<String, f64>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining setter for defaults functions.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    /// Stamp the owning sequence name, used in error reports.
    pub fn set_sequence(&mut self, name: &str) {
        self.sequence = name.to_string();
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingParameter {
                sequence: self.sequence.clone(),
                name: name.to_string(),
            })
    }

    /// Fetch a parameter that must be a non-negative integer (a loop or
    /// repetition count). Values are stored as f64 throughout, so accept
    /// anything within rounding distance of an integer.
    pub fn get_count(&self, name: &str) -> Result<usize> {
        let value = self.get(name)?;
        let rounded = value.round();
        if value < 0.0 || (value - rounded).abs() > 1e-9 {
            return Err(Error::InvalidCount {
                sequence: self.sequence.clone(),
                name: name.to_string(),
                value,
            });
        }
        Ok(rounded as usize)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
