// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket server assembly
//!
//! This module provides the server builder and the CORS fairing used by the
//! telemetry web interface.

pub mod builder;
pub mod cors;

pub use builder::build_rocket;
pub use cors::CORS;
