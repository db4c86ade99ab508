// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Chart rendering backends
//!
//! The measurement core produces a declarative [`ChartSpec`]; turning it into
//! pixels is a pluggable capability behind the [`ChartRenderer`] trait. The
//! only backend currently shipped is [`QuickChartRenderer`], which talks to a
//! QuickChart-compatible HTTP service. The core never depends on a concrete
//! backend, so a local rasterizer can be added without touching it.
//!
//! [`ChartSpec`]: crate::telemetry::ChartSpec

pub mod quickchart;

use thiserror::Error;

use crate::telemetry::ChartSpec;

pub use quickchart::QuickChartRenderer;

/// Errors that can occur while rendering a chart specification
#[derive(Error, Debug)]
pub enum RenderError {
    /// The configured rendering service URL cannot be parsed
    #[error("invalid rendering service URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The HTTP request to the rendering service failed
    #[error("chart rendering request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The rendering service answered with a non-success status
    #[error("chart rendering service returned HTTP {status}")]
    Service { status: u16 },

    /// The chart specification could not be encoded for the backend
    #[error("failed to encode chart specification: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A backend able to turn a chart specification into an image
///
/// Implementations must be cheap to share across requests; the server holds
/// one instance behind an `Arc` for the whole process lifetime.
#[rocket::async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Build a stable URL at which the rendered chart can be fetched
    ///
    /// This does not perform any I/O; the URL encodes the full chart
    /// description and can be handed to the consumer application directly.
    fn chart_url(&self, spec: &ChartSpec) -> Result<String, RenderError>;

    /// Render the chart and return the PNG bytes
    async fn render_png(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError>;
}
