// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Controlled-data and reference-voltage write endpoints

use log::info;
use rocket::http::Status;
use rocket::post;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use super::super::{api_error, extract_finite, telemetry_error, ApiError};
use crate::visualization::shared_state::{ControlledData, SharedTelemetryState};

/// Payload of a controller measurement update
///
/// Fields arrive as raw JSON values so a missing or non-numeric field maps
/// to a structured `invalid_sample` failure instead of a framework-generic
/// parse error.
#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    #[serde(default)]
    pub voltage: Option<serde_json::Value>,
    #[serde(default)]
    pub current: Option<serde_json::Value>,
}

/// Body of a successful controller update response
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub updated_data: ControlledData,
}

/// Payload for setting the reference voltage
#[derive(Debug, Deserialize)]
pub struct ReferenceVoltagePayload {
    #[serde(default)]
    pub voltage: Option<serde_json::Value>,
}

/// Body of a successful reference-voltage update response
#[derive(Debug, Serialize)]
pub struct ReferenceVoltageUpdated {
    pub success: bool,
    pub voltage: f64,
}

/// Update the controlled data from the hardware controller
///
/// **Endpoint:** `POST /api/update`
///
/// Accepts the latest voltage/current measurement, derives the point
/// resistance and stamps the update time. Last write wins.
#[post("/update", format = "json", data = "<payload>")]
pub async fn post_update(
    state: &SharedTelemetryState,
    payload: Json<UpdatePayload>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let voltage = extract_finite(payload.voltage.as_ref(), "voltage")
        .map_err(|err| telemetry_error(&err))?;
    let current = extract_finite(payload.current.as_ref(), "current")
        .map_err(|err| telemetry_error(&err))?;

    let updated_data = state.update_controlled_data(voltage, current).await;
    Ok(Json(UpdateResponse {
        success: true,
        updated_data,
    }))
}

/// Set the reference voltage from the consumer application
///
/// **Endpoint:** `POST /api/voltage`
///
/// The value models a DAC codepoint and is only accepted in `0..=255`; out
/// of range or non-numeric values are rejected with a 400 and the stored
/// reference is left untouched.
#[post("/voltage", format = "json", data = "<payload>")]
pub async fn post_reference_voltage(
    state: &SharedTelemetryState,
    payload: Json<ReferenceVoltagePayload>,
) -> Result<Json<ReferenceVoltageUpdated>, ApiError> {
    let voltage = extract_finite(payload.voltage.as_ref(), "voltage")
        .map_err(|err| telemetry_error(&err))?;

    if !(0.0..=255.0).contains(&voltage) {
        return Err(api_error(
            Status::BadRequest,
            "invalid_sample",
            format!("reference voltage {} is outside the accepted range 0-255", voltage),
        ));
    }

    state.set_reference_voltage(voltage).await;
    info!("Reference voltage set to {}", voltage);
    Ok(Json(ReferenceVoltageUpdated {
        success: true,
        voltage,
    }))
}
