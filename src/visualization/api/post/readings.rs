// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Reading-store write endpoints

use log::debug;
use rocket::post;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use super::super::{extract_finite, telemetry_error, ApiError};
use crate::visualization::shared_state::SharedTelemetryState;

/// Payload of one sample submission
///
/// Fields arrive as raw JSON values so that a missing field, a string, or a
/// non-finite number all surface as a structured `invalid_sample` failure
/// naming the field, and leave the store unchanged.
#[derive(Debug, Deserialize)]
pub struct ReadingPayload {
    #[serde(default)]
    pub current: Option<serde_json::Value>,
    #[serde(default)]
    pub voltage: Option<serde_json::Value>,
}

/// Body of a successful sample submission response
#[derive(Debug, Serialize)]
pub struct ReadingStored {
    pub success: bool,
    /// Sample count after this submission
    pub count: usize,
}

/// Body of a successful clear response
#[derive(Debug, Serialize)]
pub struct ReadingsCleared {
    pub success: bool,
    pub message: &'static str,
}

/// Record one (current, voltage) sample
///
/// **Endpoint:** `POST /api/readings`
///
/// Appends the sample to the reading store. The store grows without bound
/// until cleared; this is a deliberate limitation of bench-scale collection.
#[post("/readings", format = "json", data = "<payload>")]
pub async fn post_reading(
    state: &SharedTelemetryState,
    payload: Json<ReadingPayload>,
) -> Result<Json<ReadingStored>, ApiError> {
    let current = extract_finite(payload.current.as_ref(), "current")
        .map_err(|err| telemetry_error(&err))?;
    let voltage = extract_finite(payload.voltage.as_ref(), "voltage")
        .map_err(|err| telemetry_error(&err))?;

    let count = state
        .record_reading(current, voltage)
        .await
        .map_err(|err| telemetry_error(&err))?;

    debug!("Stored reading #{}: {} A, {} V", count, current, voltage);
    Ok(Json(ReadingStored {
        success: true,
        count,
    }))
}

/// Clear all recorded samples
///
/// **Endpoint:** `POST /api/readings/clear`
///
/// Always succeeds and is idempotent.
#[post("/readings/clear")]
pub async fn post_clear_readings(state: &SharedTelemetryState) -> Json<ReadingsCleared> {
    state.clear_readings().await;
    debug!("Reading store cleared");
    Json(ReadingsCleared {
        success: true,
        message: "Readings cleared",
    })
}
