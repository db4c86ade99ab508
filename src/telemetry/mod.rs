// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Reading accumulation and line fitting
//!
//! This module contains the measurement core of the application: the in-memory
//! store of (current, voltage) samples submitted by the hardware controller,
//! the ordinary least-squares fit over the accumulated samples, and the
//! assembly of a renderer-agnostic chart specification from that fit.
//!
//! The components form a small pipeline:
//!
//! 1. [`ReadingStore`] accumulates [`Sample`] pairs (append-only until cleared)
//! 2. [`fit`] computes `voltage = slope * current + intercept` over a snapshot
//! 3. [`build_chart_spec`] derives the scatter + fit-line [`ChartSpec`]
//!
//! None of the components perform I/O. Transport (HTTP) and rendering (chart
//! image generation) live in the `visualization` and `rendering` modules and
//! only ever see snapshots and derived values.
//!
//! ## Usage
//!
//! ```
//! use rust_ohmbench::telemetry::{build_chart_spec, fit, ReadingStore};
//!
//! let mut store = ReadingStore::new();
//! store.append(1.0, 2.0).unwrap();
//! store.append(2.0, 4.0).unwrap();
//! store.append(3.0, 6.0).unwrap();
//!
//! let samples = store.snapshot();
//! let result = fit(&samples).unwrap();
//! let spec = build_chart_spec(&samples, &result);
//! assert_eq!(spec.series.len(), 2);
//! ```

pub mod chart;
pub mod fit;
pub mod store;

use thiserror::Error;

pub use chart::{build_chart_spec, AxisSpec, ChartPoint, ChartSeries, ChartSpec};
pub use fit::{fit, FitResult, MIN_FIT_SAMPLES};
pub use store::{ReadingStore, Sample};

/// Errors that can occur while recording samples or deriving a plot
///
/// Every failure mode of the measurement core is represented here so that
/// undefined numeric results (NaN, infinity) never propagate into a chart
/// specification. The transport layer maps each variant to a structured HTTP
/// failure distinguishable by kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
    /// A submitted current/voltage field was missing, non-numeric or non-finite
    #[error("invalid sample: '{field}' is missing or not a finite number")]
    InvalidSample { field: &'static str },

    /// Fewer samples than the minimum required to determine a line
    #[error("not enough data points: {have} recorded, at least {min} required")]
    InsufficientData { have: usize, min: usize },

    /// All recorded currents are identical, the slope is undefined
    #[error("not enough variation in the data: all recorded currents are identical")]
    DegenerateFit,
}
