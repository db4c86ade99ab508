// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Chart rendering configuration
//!
//! This module defines the settings for the external chart rendering backend.
//! The measurement core only produces a declarative chart specification;
//! rendering it to an image is delegated to a QuickChart-compatible service
//! configured here.

use serde::{Deserialize, Serialize};

/// Configuration for the chart rendering backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Enable or disable rendered-image endpoints.
    ///
    /// When disabled, the chart specification endpoint remains available but
    /// the render-URL and image endpoints are not mounted. Default is `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Base URL of the QuickChart-compatible rendering service.
    ///
    /// Default is the public QuickChart instance. Point this at a self-hosted
    /// instance to keep measurement data on-premises.
    #[serde(default = "default_quickchart_url")]
    pub quickchart_url: String,

    /// Rendered image width in pixels. Default is 500.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Rendered image height in pixels. Default is 300.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_enabled() -> bool {
    true
}

/// Provides the default rendering service base URL (the public QuickChart instance).
fn default_quickchart_url() -> String {
    "https://quickchart.io".to_string()
}

fn default_width() -> u32 {
    500
}

fn default_height() -> u32 {
    300
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            quickchart_url: default_quickchart_url(),
            width: default_width(),
            height: default_height(),
        }
    }
}
