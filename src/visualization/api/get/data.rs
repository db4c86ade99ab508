// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Controlled-data and reference-voltage read endpoints

use log::debug;
use rocket::get;
use rocket::serde::json::Json;
use serde::Serialize;

use crate::visualization::shared_state::{ControlledData, SharedTelemetryState};

/// Body of the reference-voltage response
#[derive(Debug, Serialize)]
pub struct ReferenceVoltageResponse {
    pub voltage: f64,
}

/// Get the latest controlled data
///
/// **Endpoint:** `GET /api/data`
///
/// Returns the last voltage/current pair pushed by the hardware controller
/// together with the derived point resistance and the update timestamp. The
/// consumer application polls this endpoint.
#[get("/data")]
pub async fn get_data(state: &SharedTelemetryState) -> Json<ControlledData> {
    Json(state.controlled_data().await)
}

/// Get the reference voltage
///
/// **Endpoint:** `GET /api/voltage`
///
/// Returns the reference control value last set by the consumer application.
/// The hardware controller polls this endpoint to pick up its setpoint.
#[get("/voltage")]
pub async fn get_reference_voltage(state: &SharedTelemetryState) -> Json<ReferenceVoltageResponse> {
    let voltage = state.reference_voltage().await;
    debug!("Reference voltage requested: {}", voltage);
    Json(ReferenceVoltageResponse { voltage })
}
