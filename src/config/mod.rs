// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the measurement relay
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! checked against a set of validation rules after deserialization.
//!
//! ## Configuration Structure
//!
//! The application's configuration is organized as a nested structure with sections:
//! - `visualization`: Settings for the web server exposing the telemetry API
//! - `chart`: Settings for the external chart rendering backend
//!
//! ## Usage
//!
//! ```no_run
//! use rust_ohmbench::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(8081),                  // Web port
//!     Some("0.0.0.0".to_string()), // Web address
//!     true,                        // Server mode
//! );
//!
//! // Access configuration values
//! println!("Server port: {}", config.visualization.port);
//! ```

pub mod chart;
pub mod utils;
pub mod visualization;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

// Re-export all types for public API
pub use chart::ChartConfig;
pub use utils::is_valid_ip_address;
pub use visualization::VisualizationConfig;

/// Root configuration structure for the measurement relay.
///
/// This structure serves as the main container for all configuration sections
/// of the application. It is deserialized from and serialized to YAML using
/// the serde framework; each section falls back to its defaults when not
/// present in the file, allowing for minimal configuration files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Settings for the web server exposing the telemetry API.
    ///
    /// These settings control how the server behaves, including network
    /// binding and the reported server name. If not specified in the
    /// configuration file, default values are used.
    #[serde(default)]
    pub visualization: VisualizationConfig,

    /// Settings for the external chart rendering backend.
    ///
    /// This section controls whether rendered-image endpoints are exposed,
    /// which QuickChart-compatible endpoint they talk to, and the rendered
    /// image dimensions. If not specified, default values are used.
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Creating sample configuration file at {:?}", sample_path);

        // Create parent directories if they don't exist
        if let Some(parent) = sample_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        let sample_config = Self::default();
        sample_config
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// If the file does not exist, a default configuration is created, saved
    /// to the given path and returned. If the file exists but cannot be
    /// parsed or fails rule validation, a `*.sample.yaml` with default values
    /// is written next to it for the user to edit, and an error is returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let config: Config = match serde_yml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                // Generate a sample config file for the user to edit
                match Self::create_sample_config(path) {
                    Ok(_) => debug!("Successfully created sample config"),
                    Err(e) => error!("Failed to create sample config: {}", e),
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        // Perform additional validations beyond what serde can express
        if let Err(err) = utils::validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only values that are explicitly provided override the existing
    /// configuration.
    ///
    /// ### Parameters
    ///
    /// * `web_port` - TCP port for the web server
    /// * `web_address` - Network address for the web server to bind to
    /// * `server_mode` - If true, ensures the web server is enabled
    pub fn apply_args(
        &mut self,
        web_port: Option<u16>,
        web_address: Option<String>,
        server_mode: bool,
    ) {
        if let Some(port) = web_port {
            self.visualization.port = port;
        }
        if let Some(address) = web_address {
            self.visualization.address = address;
        }
        if server_mode {
            self.visualization.enabled = true;
        }
    }
}
