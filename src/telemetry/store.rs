// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sample storage for accumulated V-I readings
//!
//! The [`ReadingStore`] is the only mutable state of the measurement core. It
//! keeps samples in insertion order (order matters only for reproducibility of
//! debugging output, the fit itself is order-independent) and grows without
//! bound until the caller issues a clear. Unbounded growth is an accepted
//! limitation: sample counts come from bench-scale data collection, not
//! high-frequency streaming.

use serde::{Deserialize, Serialize};

use super::TelemetryError;

/// One recorded (current, voltage) measurement pair
///
/// Samples are immutable once recorded and carry no identity beyond their
/// position in the store. Both values are guaranteed finite by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Measured current in amperes
    pub current: f64,
    /// Measured voltage in volts
    pub voltage: f64,
}

impl Sample {
    /// Create a sample, rejecting NaN and infinite values
    ///
    /// The original firmware let non-finite values through silently and they
    /// would resurface later as NaN chart coordinates. Rejecting them here
    /// keeps the invariant that every stored sample is plottable.
    ///
    /// ### Returns
    ///
    /// The sample, or [`TelemetryError::InvalidSample`] naming the offending
    /// field.
    pub fn new(current: f64, voltage: f64) -> Result<Self, TelemetryError> {
        if !current.is_finite() {
            return Err(TelemetryError::InvalidSample { field: "current" });
        }
        if !voltage.is_finite() {
            return Err(TelemetryError::InvalidSample { field: "voltage" });
        }
        Ok(Sample { current, voltage })
    }
}

/// Ordered, clearable sequence of recorded samples
///
/// Starts empty at process start, grows by one element per accepted
/// submission and is reset by [`ReadingStore::clear`]. The store is never
/// persisted; all state is process-lifetime only.
///
/// The store itself is not synchronized. Concurrent access goes through
/// `SharedTelemetryState`, which wraps it in an async `RwLock` so that
/// append, clear and snapshot are each atomic with respect to one another.
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    samples: Vec<Sample>,
}

impl ReadingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to the end of the sequence
    ///
    /// ### Parameters
    ///
    /// * `current` - measured current in amperes, must be finite
    /// * `voltage` - measured voltage in volts, must be finite
    ///
    /// ### Returns
    ///
    /// `Ok(())` on success. On [`TelemetryError::InvalidSample`] the store is
    /// left unchanged.
    pub fn append(&mut self, current: f64, voltage: f64) -> Result<(), TelemetryError> {
        let sample = Sample::new(current, voltage)?;
        self.samples.push(sample);
        Ok(())
    }

    /// Reset the store to empty
    ///
    /// Always succeeds and is idempotent. This is the only release mechanism
    /// for accumulated samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Return an owned copy of the sequence at the instant of the call
    ///
    /// The copy is decoupled from subsequent mutation: appends or clears that
    /// happen after the snapshot is taken are not observable through it. The
    /// fit and chart-spec derivation both operate on one such snapshot so a
    /// plot is always internally consistent.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.clone()
    }

    /// Current number of recorded samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples are recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_grows_by_one_and_len_matches_snapshot() {
        let mut store = ReadingStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());

        store.append(1.0, 2.0).unwrap();
        store.append(2.0, 4.0).unwrap();
        store.append(3.0, 6.0).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshot().len(), store.len());
        assert_eq!(
            store.snapshot()[1],
            Sample {
                current: 2.0,
                voltage: 4.0
            }
        );
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut store = ReadingStore::new();
        store.append(1.0, 1.0).unwrap();

        let snapshot = store.snapshot();
        store.append(2.0, 2.0).unwrap();
        store.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].current, 1.0);
    }

    #[test]
    fn clear_empties_and_is_idempotent() {
        let mut store = ReadingStore::new();
        store.append(1.0, 1.0).unwrap();
        store.append(2.0, 2.0).unwrap();

        store.clear();
        assert!(store.snapshot().is_empty());

        // A second clear has the same observable effect as one
        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn non_finite_values_are_rejected_and_store_unchanged() {
        let mut store = ReadingStore::new();

        assert_eq!(
            store.append(f64::NAN, 1.0),
            Err(TelemetryError::InvalidSample { field: "current" })
        );
        assert_eq!(
            store.append(1.0, f64::INFINITY),
            Err(TelemetryError::InvalidSample { field: "voltage" })
        );
        assert_eq!(
            store.append(f64::NEG_INFINITY, 1.0),
            Err(TelemetryError::InvalidSample { field: "current" })
        );
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn sample_serializes_to_plain_json() {
        let sample = Sample::new(0.5, 12.0).unwrap();
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json, serde_json::json!({"current": 0.5, "voltage": 12.0}));
    }
}
