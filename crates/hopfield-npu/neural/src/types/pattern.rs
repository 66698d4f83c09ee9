// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bipolar patterns and live network states
//!
//! [`Pattern`] is immutable and can only be built through a checked factory,
//! so every other module may assume it has the right alphabet. A
//! [`NetworkState`] is the mutable configuration the relaxation engine works
//! on; it is seeded from a pattern (or checked raw values) and only ever
//! written with `NEURON_ON`/`NEURON_OFF`.

use core::fmt;

use super::error::{HopfieldError, Result};

/// Active neuron value
pub const NEURON_ON: i8 = 1;

/// Inactive neuron value
pub const NEURON_OFF: i8 = -1;

/// Check every value against the bipolar alphabet and narrow it to `i8`.
fn validate_values(values: &[i32], size: usize) -> Result<Vec<i8>> {
    if size == 0 || values.len() != size {
        return Err(HopfieldError::shape(size, values.len()));
    }
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            1 => Ok(NEURON_ON),
            -1 => Ok(NEURON_OFF),
            _ => Err(HopfieldError::Alphabet { index, value }),
        })
        .collect()
}

/// An immutable bipolar pattern of fixed length
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<i8>", into = "Vec<i8>")
)]
pub struct Pattern {
    values: Vec<i8>,
}

impl Pattern {
    /// Build a pattern of exactly `size` neurons
    ///
    /// # Errors
    /// - `Shape` if `values.len() != size` or `size == 0`
    /// - `Alphabet` if any element is not `-1` or `+1`
    ///
    /// # Example
    /// ```
    /// use hopfield_npu_neural::{HopfieldError, Pattern};
    ///
    /// let p = Pattern::new(&[1, -1, 1], 3).unwrap();
    /// assert_eq!(p.len(), 3);
    ///
    /// assert!(matches!(Pattern::new(&[1, 0, 1], 3), Err(HopfieldError::Alphabet { index: 1, .. })));
    /// assert!(matches!(Pattern::new(&[1, 1], 3), Err(HopfieldError::Shape { .. })));
    /// ```
    pub fn new(values: &[i32], size: usize) -> Result<Self> {
        Ok(Self {
            values: validate_values(values, size)?,
        })
    }

    /// Build a pattern from already-narrowed values, taking its size from the input
    pub fn from_bipolar(values: Vec<i8>) -> Result<Self> {
        if values.is_empty() {
            return Err(HopfieldError::shape(1, 0));
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != NEURON_ON && v != NEURON_OFF)
        {
            return Err(HopfieldError::Alphabet {
                index,
                value: value as i32,
            });
        }
        Ok(Self { values })
    }

    /// Values must already be `NEURON_ON`/`NEURON_OFF`
    pub(crate) fn from_bipolar_unchecked(values: Vec<i8>) -> Self {
        debug_assert!(values.iter().all(|&v| v == NEURON_ON || v == NEURON_OFF));
        Self { values }
    }

    /// Number of neurons
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: the factory rejects empty patterns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.values
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<i8> {
        self.values.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.values.iter().copied()
    }

    /// Values widened to `i32`
    pub fn to_values(&self) -> Vec<i32> {
        self.values.iter().map(|&v| v as i32).collect()
    }

    /// Fail with `Shape` unless this pattern has `size` neurons
    pub fn ensure_size(&self, size: usize) -> Result<()> {
        if self.values.len() != size {
            return Err(HopfieldError::shape(size, self.values.len()));
        }
        Ok(())
    }
}

impl AsRef<[i8]> for Pattern {
    fn as_ref(&self) -> &[i8] {
        &self.values
    }
}

impl TryFrom<Vec<i8>> for Pattern {
    type Error = HopfieldError;

    fn try_from(values: Vec<i8>) -> Result<Self> {
        Pattern::from_bipolar(values)
    }
}

impl From<Pattern> for Vec<i8> {
    fn from(pattern: Pattern) -> Self {
        pattern.values
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &v in &self.values {
            f.write_str(if v == NEURON_ON { "+" } else { "-" })?;
        }
        Ok(())
    }
}

/// The live configuration of a network during relaxation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct NetworkState {
    values: Vec<i8>,
}

impl NetworkState {
    /// Build a state of exactly `size` neurons from raw values
    ///
    /// Same validation as [`Pattern::new`].
    pub fn new(values: &[i32], size: usize) -> Result<Self> {
        Ok(Self {
            values: validate_values(values, size)?,
        })
    }

    /// Start a state from a probe pattern
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self {
            values: pattern.values.clone(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.values
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<i8> {
        self.values.get(index).copied()
    }

    /// Set neuron `index` to `+1` (`active`) or `-1`; returns true if it changed
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set_active(&mut self, index: usize, active: bool) -> bool {
        let value = if active { NEURON_ON } else { NEURON_OFF };
        let changed = self.values[index] != value;
        self.values[index] = value;
        changed
    }

    /// Invert neuron `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn flip(&mut self, index: usize) {
        self.values[index] = -self.values[index];
    }

    /// Snapshot the current configuration as an immutable pattern
    pub fn to_pattern(&self) -> Pattern {
        Pattern {
            values: self.values.clone(),
        }
    }

    /// True if the state equals `pattern` neuron for neuron
    pub fn matches(&self, pattern: &Pattern) -> bool {
        self.values == pattern.values
    }

    /// Fail with `Shape` unless this state has `size` neurons
    pub fn ensure_size(&self, size: usize) -> Result<()> {
        if self.values.len() != size {
            return Err(HopfieldError::shape(size, self.values.len()));
        }
        Ok(())
    }
}

impl AsRef<[i8]> for NetworkState {
    fn as_ref(&self) -> &[i8] {
        &self.values
    }
}

impl From<&Pattern> for NetworkState {
    fn from(pattern: &Pattern) -> Self {
        NetworkState::from_pattern(pattern)
    }
}

impl From<NetworkState> for Pattern {
    fn from(state: NetworkState) -> Self {
        Pattern {
            values: state.values,
        }
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &v in &self.values {
            f.write_str(if v == NEURON_ON { "+" } else { "-" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_valid() {
        let p = Pattern::new(&[1, 1, 1, -1, -1, -1, 1, 1], 8).unwrap();
        assert_eq!(p.len(), 8);
        assert_eq!(p.get(3), Some(-1));
        assert_eq!(p.to_values(), vec![1, 1, 1, -1, -1, -1, 1, 1]);
        assert_eq!(p.to_string(), "+++---++");
    }

    #[test]
    fn test_pattern_wrong_length() {
        let err = Pattern::new(&[1, -1, 1], 8).unwrap_err();
        assert_eq!(err, HopfieldError::Shape { expected: 8, actual: 3 });
    }

    #[test]
    fn test_pattern_zero_size() {
        assert!(matches!(
            Pattern::new(&[], 0),
            Err(HopfieldError::Shape { expected: 0, actual: 0 })
        ));
    }

    #[test]
    fn test_pattern_out_of_alphabet() {
        let err = Pattern::new(&[1, -1, 0, 1], 4).unwrap_err();
        assert_eq!(err, HopfieldError::Alphabet { index: 2, value: 0 });

        let err = Pattern::new(&[1, 2, -1, 1], 4).unwrap_err();
        assert_eq!(err, HopfieldError::Alphabet { index: 1, value: 2 });
    }

    #[test]
    fn test_shape_checked_before_alphabet() {
        let err = Pattern::new(&[0, 0], 4).unwrap_err();
        assert!(matches!(err, HopfieldError::Shape { .. }));
    }

    #[test]
    fn test_from_bipolar() {
        assert!(Pattern::from_bipolar(vec![1, -1]).is_ok());
        assert!(matches!(
            Pattern::from_bipolar(vec![1, 3]),
            Err(HopfieldError::Alphabet { index: 1, value: 3 })
        ));
        assert!(Pattern::from_bipolar(vec![]).is_err());
    }

    #[test]
    fn test_state_mutation() {
        let p = Pattern::new(&[1, -1, 1], 3).unwrap();
        let mut state = NetworkState::from_pattern(&p);
        assert!(state.matches(&p));

        assert!(state.set_active(1, true));
        assert!(!state.set_active(1, true));
        assert_eq!(state.as_slice(), &[1, 1, 1]);

        state.flip(0);
        assert_eq!(state.get(0), Some(-1));
        assert!(!state.matches(&p));
        assert_eq!(state.to_pattern().to_values(), vec![-1, 1, 1]);
    }

    #[test]
    fn test_serde_rejects_invalid_values() {
        let p = Pattern::new(&[1, -1, -1], 3).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[1,-1,-1]");
        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        assert!(serde_json::from_str::<Pattern>("[1,0,-1]").is_err());
    }
}
