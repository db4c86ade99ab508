// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Web server configuration
//!
//! This module defines the structure for configuring the web server that
//! exposes the telemetry API to the hardware controller and the consumer
//! application.

use serde::{Deserialize, Serialize};

/// Configuration for the telemetry web server.
///
/// This structure contains all settings required for the web server
/// component, primarily the network binding parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationConfig {
    /// The TCP port the server will listen on.
    ///
    /// Valid range is 1-65534. Default value is 8080.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The network address the server will bind to.
    ///
    /// Can be an IPv4/IPv6 address or a hostname. Default is "127.0.0.1".
    /// Use "0.0.0.0" to bind to all IPv4 interfaces.
    #[serde(default = "default_address")]
    pub address: String,

    /// The server name reported in HTTP headers and logs.
    ///
    /// Default is "OhmBenchApiServer/" followed by the package version.
    #[serde(default = "default_name")]
    pub name: String,

    /// Enable or disable the web server.
    ///
    /// This flag can be used to easily disable the server without removing
    /// the configuration. Default is `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Provides the default TCP port (8080) for the web server.
fn default_port() -> u16 {
    8080
}

/// Provides the default network binding address (127.0.0.1).
///
/// The loopback address ensures the server only accepts connections from the
/// local machine, which is secure for development purposes. For production use
/// where the hardware controller connects over the network, set "0.0.0.0".
fn default_address() -> String {
    "127.0.0.1".to_string()
}

/// Provides the default server identity string with the package version.
fn default_name() -> String {
    format!("OhmBenchApiServer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_enabled() -> bool {
    true
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            address: default_address(),
            name: default_name(),
            enabled: default_enabled(),
        }
    }
}
