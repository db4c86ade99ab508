// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust OhmBench library
//!
//! This library provides the building blocks of a bench measurement relay:
//! an in-memory store of voltage/current telemetry, a least-squares V-I
//! characterization with chart-spec derivation, and a Rocket web interface
//! relaying data between the hardware controller and the consumer
//! application.

pub mod config;
pub mod daemon;
pub mod rendering;
pub mod telemetry;
pub mod visualization;
