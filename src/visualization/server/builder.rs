// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket server builder and configuration
//!
//! This module provides functions to build and configure the Rocket server
//! instance with all necessary routes, fairings, and state management.

use std::sync::Arc;

use log::debug;
use rocket::figment::Figment;
use rocket::{routes, Build, Rocket};

use super::cors::{options, CORS};
use crate::rendering::ChartRenderer;
use crate::visualization::api::{
    get_data, get_graph, get_graph_image, get_graph_url, get_reference_voltage,
    post_clear_readings, post_reading, post_reference_voltage, post_update,
};
use crate::visualization::shared_state::SharedTelemetryState;

/// Build a configured Rocket server instance
///
/// This function creates and configures a Rocket server instance with all
/// necessary routes, fairings, and state management for the telemetry relay.
///
/// ### Parameters
///
/// * `figment` - The Rocket configuration figment containing server settings
/// * `state` - The shared telemetry state backing all endpoints
/// * `renderer` - Optional chart rendering backend; when `None` the
///   rendered-chart routes (`/api/graph/url`, `/api/graph/image`) are not
///   mounted and only the structured `/api/graph` endpoint is served
///
/// ### Returns
///
/// A configured Rocket instance ready to be launched
///
/// ### Example
///
/// ```no_run
/// use rocket::figment::Figment;
/// use rust_ohmbench::visualization::{server, SharedTelemetryState};
///
/// async fn example() {
///     let figment = Figment::from(rocket::Config::default());
///     let state = SharedTelemetryState::new();
///     let rocket = server::build_rocket(figment, state, None);
///     // Launch the server
///     // rocket.launch().await.expect("Failed to launch");
/// }
/// ```
pub fn build_rocket(
    figment: Figment,
    state: SharedTelemetryState,
    renderer: Option<Arc<dyn ChartRenderer>>,
) -> Rocket<Build> {
    let rocket_builder = rocket::custom(figment)
        .attach(CORS)
        .mount("/", routes![options])
        .mount(
            "/api",
            routes![
                get_data,
                get_reference_voltage,
                get_graph,
                post_update,
                post_reference_voltage,
                post_reading,
                post_clear_readings,
            ],
        )
        .manage(state);

    // Rendered-chart routes need a backend; without one they would only ever
    // answer 500 from the missing managed state.
    if let Some(renderer) = renderer {
        rocket_builder
            .mount("/api", routes![get_graph_url, get_graph_image])
            .manage(renderer)
    } else {
        debug!("No chart renderer configured, rendered-chart routes not mounted");
        rocket_builder
    }
}
