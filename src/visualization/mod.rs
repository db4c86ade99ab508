// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Visualization and transport module
//!
//! This module contains everything the measurement core hands its data to:
//! the shared runtime state accessed by the web API, the Rocket route
//! handlers, and the server builder. The core itself (`telemetry`) knows
//! nothing about request/response framing; this module decodes wire-level
//! requests into numeric pairs and maps core error signals to structured
//! HTTP failures.

pub mod api;
pub mod server;
pub mod shared_state;

pub use shared_state::{ControlledData, SharedTelemetryState};
