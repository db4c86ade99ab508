// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Shared state management for the telemetry server
//!
//! This module provides the runtime state shared between the daemon
//! components and the web API endpoints: the controlled-data record updated
//! by the hardware controller, the reference voltage set by the consumer
//! application, and the reading store feeding the V-I characterization. All
//! data is protected by async RwLock for safe concurrent access.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::telemetry::{build_chart_spec, fit, ChartSpec, ReadingStore, TelemetryError};

/// Snapshot of the latest values pushed by the hardware controller
///
/// A plain field echo with one derived value: `resistance` is
/// `voltage / current` (0 when the current is 0) and `time` is the UTC
/// instant of the last update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlledData {
    /// Last reported voltage in volts
    pub voltage: f64,
    /// Last reported current in amperes
    pub current: f64,
    /// Point resistance estimate, volts / amperes
    pub resistance: f64,
    /// Instant of the last update
    pub time: DateTime<Utc>,
}

impl Default for ControlledData {
    fn default() -> Self {
        // Startup values expected by the bench controller firmware
        Self {
            voltage: 120.0,
            current: 10.0,
            resistance: 0.0,
            time: Utc::now(),
        }
    }
}

/// Global shared state for the telemetry server
///
/// This structure contains the runtime data accessed by both the daemon
/// tasks (heartbeat) and the web API endpoints. It is the single owner of
/// the [`ReadingStore`]; the transport layer never holds references to
/// individual samples, it only issues append/clear/plot requests through the
/// async accessors below.
#[derive(Debug, Clone, Default)]
pub struct SharedTelemetryState {
    controlled: Arc<RwLock<ControlledData>>,
    reference_voltage: Arc<RwLock<f64>>,
    readings: Arc<RwLock<ReadingStore>>,
}

impl SharedTelemetryState {
    /// Create a new shared state instance with startup values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the latest controlled-data record
    pub async fn controlled_data(&self) -> ControlledData {
        *self.controlled.read().await
    }

    /// Replace the controlled-data record from a controller update
    ///
    /// Derives the point resistance (`voltage / current`, 0 when the current
    /// is 0) and stamps the update time. Last write wins.
    ///
    /// ### Returns
    ///
    /// The record as stored.
    pub async fn update_controlled_data(&self, voltage: f64, current: f64) -> ControlledData {
        let resistance = if current != 0.0 { voltage / current } else { 0.0 };
        let updated = ControlledData {
            voltage,
            current,
            resistance,
            time: Utc::now(),
        };
        *self.controlled.write().await = updated;
        updated
    }

    /// Get the reference voltage requested from the controller
    pub async fn reference_voltage(&self) -> f64 {
        *self.reference_voltage.read().await
    }

    /// Set the reference voltage
    ///
    /// Range validation happens at the transport boundary; this is an
    /// unconditional write.
    pub async fn set_reference_voltage(&self, voltage: f64) {
        *self.reference_voltage.write().await = voltage;
    }

    /// Record one (current, voltage) sample
    ///
    /// ### Returns
    ///
    /// The new sample count, or [`TelemetryError::InvalidSample`] with the
    /// store unchanged.
    pub async fn record_reading(
        &self,
        current: f64,
        voltage: f64,
    ) -> Result<usize, TelemetryError> {
        let mut store = self.readings.write().await;
        store.append(current, voltage)?;
        Ok(store.len())
    }

    /// Clear all recorded samples
    pub async fn clear_readings(&self) {
        self.readings.write().await.clear();
    }

    /// Current number of recorded samples
    pub async fn reading_count(&self) -> usize {
        self.readings.read().await.len()
    }

    /// Derive the chart specification for the current store contents
    ///
    /// Holds a single read guard across snapshot, fit and chart-spec
    /// assembly, so the whole derivation is one logical read transaction: a
    /// concurrent clear or append serializes behind the lock and can never
    /// pair a fit with boundary points from a different snapshot.
    pub async fn chart_spec(&self) -> Result<ChartSpec, TelemetryError> {
        let store = self.readings.read().await;
        let samples = store.snapshot();
        let fit_result = fit(&samples)?;
        Ok(build_chart_spec(&samples, &fit_result))
    }
}

/// Rocket request guard for accessing the shared telemetry state
///
/// This allows endpoints to access the shared state by including
/// `&SharedTelemetryState` as a parameter.
#[rocket::async_trait]
impl<'r> rocket::request::FromRequest<'r> for &'r SharedTelemetryState {
    type Error = ();

    async fn from_request(
        request: &'r rocket::Request<'_>,
    ) -> rocket::request::Outcome<Self, Self::Error> {
        request
            .rocket()
            .state::<SharedTelemetryState>()
            .map(rocket::request::Outcome::Success)
            .unwrap_or_else(|| {
                rocket::request::Outcome::Error((rocket::http::Status::InternalServerError, ()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn controller_update_derives_resistance_and_timestamp() {
        let state = SharedTelemetryState::new();
        let before = Utc::now();

        let updated = state.update_controlled_data(12.0, 3.0).await;
        assert_eq!(updated.resistance, 4.0);
        assert!(updated.time >= before);

        // Zero current must not divide
        let updated = state.update_controlled_data(12.0, 0.0).await;
        assert_eq!(updated.resistance, 0.0);

        let read_back = state.controlled_data().await;
        assert_eq!(read_back.voltage, 12.0);
        assert_eq!(read_back.current, 0.0);
    }

    #[tokio::test]
    async fn reference_voltage_round_trips() {
        let state = SharedTelemetryState::new();
        assert_eq!(state.reference_voltage().await, 0.0);

        state.set_reference_voltage(128.0).await;
        assert_eq!(state.reference_voltage().await, 128.0);
    }

    #[tokio::test]
    async fn readings_accumulate_and_clear() {
        let state = SharedTelemetryState::new();
        assert_eq!(state.record_reading(1.0, 2.0).await.unwrap(), 1);
        assert_eq!(state.record_reading(2.0, 4.0).await.unwrap(), 2);
        assert_eq!(state.reading_count().await, 2);

        state.clear_readings().await;
        assert_eq!(state.reading_count().await, 0);
    }

    #[tokio::test]
    async fn invalid_reading_leaves_count_unchanged() {
        let state = SharedTelemetryState::new();
        state.record_reading(1.0, 2.0).await.unwrap();

        let err = state.record_reading(f64::NAN, 2.0).await.unwrap_err();
        assert_eq!(err, TelemetryError::InvalidSample { field: "current" });
        assert_eq!(state.reading_count().await, 1);
    }

    #[tokio::test]
    async fn chart_spec_reflects_one_consistent_snapshot() {
        let state = SharedTelemetryState::new();
        state.record_reading(1.0, 2.0).await.unwrap();
        state.record_reading(3.0, 6.0).await.unwrap();

        let spec = state.chart_spec().await.unwrap();
        assert_eq!(spec.series[0].points.len(), 2);
        assert_eq!(spec.series[1].points[0].x, 1.0);
        assert_eq!(spec.series[1].points[1].x, 3.0);
        assert!((spec.fit.slope - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn chart_spec_signals_insufficient_data() {
        let state = SharedTelemetryState::new();
        assert_eq!(
            state.chart_spec().await.unwrap_err(),
            TelemetryError::InsufficientData { have: 0, min: 2 }
        );

        state.record_reading(1.0, 2.0).await.unwrap();
        assert_eq!(
            state.chart_spec().await.unwrap_err(),
            TelemetryError::InsufficientData { have: 1, min: 2 }
        );
    }
}
