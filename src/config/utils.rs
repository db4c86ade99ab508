// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation rules that cannot be expressed through
//! serde defaults alone.

use anyhow::{bail, Result};
use url::Url;

use super::Config;

/// Check if a string is a valid IP address
///
/// Validates that a string represents a valid IPv4 or IPv6 address,
/// or is one of the special values like "localhost" or "0.0.0.0".
///
/// # Arguments
///
/// * `addr` - The address string to validate
///
/// # Returns
///
/// `true` if the address is valid, `false` otherwise
pub fn is_valid_ip_address(addr: &str) -> bool {
    if addr.parse::<std::net::IpAddr>().is_ok() {
        return true;
    }

    // Special cases
    matches!(addr, "localhost" | "::" | "::0" | "0.0.0.0")
}

/// Validates the configuration against rules that serde cannot express.
///
/// Checks that the server binding parameters are usable and that the chart
/// rendering settings are coherent when rendering is enabled.
///
/// # Arguments
///
/// * `config` - The configuration object to validate
///
/// # Returns
///
/// * `Ok(())` if all validations pass
/// * `Err(anyhow::Error)` with a descriptive message if any validation fails
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    if config.visualization.port == 0 {
        bail!("visualization.port must be in the range 1-65534");
    }

    if !is_valid_ip_address(&config.visualization.address) {
        bail!(
            "visualization.address is not a valid bind address: {}",
            config.visualization.address
        );
    }

    if config.chart.enabled {
        let url = Url::parse(&config.chart.quickchart_url).map_err(|err| {
            anyhow::anyhow!(
                "chart.quickchart_url is not a valid URL ({}): {}",
                config.chart.quickchart_url,
                err
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!(
                "chart.quickchart_url must be an http or https URL: {}",
                config.chart.quickchart_url
            );
        }
        if config.chart.width == 0 || config.chart.height == 0 {
            bail!("chart.width and chart.height must be non-zero");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_bind_addresses() {
        assert!(is_valid_ip_address("127.0.0.1"));
        assert!(is_valid_ip_address("0.0.0.0"));
        assert!(is_valid_ip_address("::"));
        assert!(is_valid_ip_address("localhost"));
        assert!(!is_valid_ip_address("not-an-address"));
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(validate_specific_rules(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_bad_renderer_url() {
        let mut config = Config::default();
        config.chart.quickchart_url = "ftp://quickchart.io".to_string();
        assert!(validate_specific_rules(&config).is_err());

        config.chart.quickchart_url = "not a url".to_string();
        assert!(validate_specific_rules(&config).is_err());

        // Disabling rendering makes the URL irrelevant
        config.chart.enabled = false;
        assert!(validate_specific_rules(&config).is_ok());
    }
}
