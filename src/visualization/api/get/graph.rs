// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Plot endpoints
//!
//! `GET /api/graph` returns the renderer-agnostic chart specification as
//! structured data. The two rendered variants (`/url` and `/image`) go
//! through the configured [`ChartRenderer`] and are only mounted when chart
//! rendering is enabled in configuration.

use std::sync::Arc;

use log::warn;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;

use super::super::{api_error, telemetry_error, ApiError};
use crate::rendering::ChartRenderer;
use crate::telemetry::ChartSpec;
use crate::visualization::shared_state::SharedTelemetryState;

/// Body of the render-URL response
#[derive(Debug, Serialize)]
pub struct GraphUrlResponse {
    pub success: bool,
    pub image_url: String,
}

/// Get the chart specification for the accumulated readings
///
/// **Endpoint:** `GET /api/graph`
///
/// Derives a fresh least-squares fit over the current store snapshot and
/// returns the declarative chart description: the observed scatter series,
/// the two-point fit line spanning the observed current range, axis titles
/// and the fit coefficients.
///
/// # Error Responses
///
/// - `400 Bad Request` (`insufficient_data`): fewer than 2 samples recorded
/// - `422 Unprocessable Entity` (`degenerate_fit`): all currents identical
#[get("/graph")]
pub async fn get_graph(state: &SharedTelemetryState) -> Result<Json<ChartSpec>, ApiError> {
    state
        .chart_spec()
        .await
        .map(Json)
        .map_err(|err| telemetry_error(&err))
}

/// Get a URL at which the rendered chart can be fetched
///
/// **Endpoint:** `GET /api/graph/url`
///
/// The URL encodes the full chart description for the configured rendering
/// service; fetching it is the consumer's business. Mirrors the original
/// firmware protocol where the relay answered with `image_url`.
#[get("/graph/url")]
pub async fn get_graph_url(
    state: &SharedTelemetryState,
    renderer: &State<Arc<dyn ChartRenderer>>,
) -> Result<Json<GraphUrlResponse>, ApiError> {
    let spec = state
        .chart_spec()
        .await
        .map_err(|err| telemetry_error(&err))?;

    let image_url = renderer.chart_url(&spec).map_err(|err| {
        warn!("Failed to build chart URL: {}", err);
        api_error(Status::BadGateway, "render_failed", err.to_string())
    })?;

    Ok(Json(GraphUrlResponse {
        success: true,
        image_url,
    }))
}

/// Get the rendered chart image
///
/// **Endpoint:** `GET /api/graph/image`
///
/// Proxies the PNG bytes from the rendering service so consumers that cannot
/// reach it directly (or should not learn its address) still get an image.
///
/// # Error Responses
///
/// - `400` / `422`: as for `GET /api/graph`
/// - `502 Bad Gateway` (`render_failed`): the rendering service call failed
#[get("/graph/image")]
pub async fn get_graph_image(
    state: &SharedTelemetryState,
    renderer: &State<Arc<dyn ChartRenderer>>,
) -> Result<(ContentType, Vec<u8>), ApiError> {
    let spec = state
        .chart_spec()
        .await
        .map_err(|err| telemetry_error(&err))?;

    let png = renderer.render_png(&spec).await.map_err(|err| {
        warn!("Chart rendering failed: {}", err);
        api_error(Status::BadGateway, "render_failed", err.to_string())
    })?;

    Ok((ContentType::PNG, png))
}
