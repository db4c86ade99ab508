// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! QuickChart rendering backend
//!
//! Maps a [`ChartSpec`] onto a Chart.js scatter configuration and delegates
//! rasterization to a QuickChart-compatible HTTP service. The GET form
//! (`/chart?c=...`) produces a shareable URL; the POST form returns the PNG
//! bytes directly.

use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use super::{ChartRenderer, RenderError};
use crate::config::ChartConfig;
use crate::telemetry::ChartSpec;

/// Renderer backed by a QuickChart-compatible service
pub struct QuickChartRenderer {
    /// Fully resolved `/chart` endpoint of the rendering service
    endpoint: Url,
    width: u32,
    height: u32,
    client: Client,
}

impl QuickChartRenderer {
    /// Create a renderer from the chart configuration section
    pub fn from_config(config: &ChartConfig) -> Result<Self, RenderError> {
        let endpoint = Url::parse(&config.quickchart_url)?.join("chart")?;
        Ok(Self {
            endpoint,
            width: config.width,
            height: config.height,
            client: Client::new(),
        })
    }

    /// Translate the renderer-agnostic spec into a Chart.js configuration
    ///
    /// Unconnected series render as blue scatter points, connected series as
    /// red lines without area fill. Axis titles carry over unchanged.
    fn chartjs_config(spec: &ChartSpec) -> Value {
        let datasets: Vec<Value> = spec
            .series
            .iter()
            .map(|series| {
                let color = if series.connected { "red" } else { "blue" };
                json!({
                    "label": series.label,
                    "data": series
                        .points
                        .iter()
                        .map(|p| json!({ "x": p.x, "y": p.y }))
                        .collect::<Vec<Value>>(),
                    "borderColor": color,
                    "backgroundColor": color,
                    "showLine": series.connected,
                    "fill": false,
                })
            })
            .collect();

        json!({
            "type": "scatter",
            "data": { "datasets": datasets },
            "options": {
                "scales": {
                    "x": { "title": { "display": true, "text": spec.x_axis.title } },
                    "y": { "title": { "display": true, "text": spec.y_axis.title } },
                }
            }
        })
    }
}

#[rocket::async_trait]
impl ChartRenderer for QuickChartRenderer {
    fn chart_url(&self, spec: &ChartSpec) -> Result<String, RenderError> {
        let config = serde_json::to_string(&Self::chartjs_config(spec))?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("c", &config)
            .append_pair("w", &self.width.to_string())
            .append_pair("h", &self.height.to_string())
            .append_pair("format", "png");

        Ok(url.into())
    }

    async fn render_png(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
        let body = json!({
            "chart": Self::chartjs_config(spec),
            "width": self.width,
            "height": self.height,
            "format": "png",
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Service {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{build_chart_spec, fit, Sample};

    fn spec() -> ChartSpec {
        let samples = vec![
            Sample::new(1.0, 2.0).unwrap(),
            Sample::new(2.0, 4.0).unwrap(),
            Sample::new(3.0, 6.0).unwrap(),
        ];
        let result = fit(&samples).unwrap();
        build_chart_spec(&samples, &result)
    }

    #[test]
    fn chartjs_config_mirrors_the_spec() {
        let config = QuickChartRenderer::chartjs_config(&spec());

        assert_eq!(config["type"], "scatter");
        let datasets = config["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0]["showLine"], false);
        assert_eq!(datasets[0]["borderColor"], "blue");
        assert_eq!(datasets[1]["showLine"], true);
        assert_eq!(datasets[1]["borderColor"], "red");
        assert_eq!(datasets[1]["data"].as_array().unwrap().len(), 2);
        assert_eq!(
            config["options"]["scales"]["x"]["title"]["text"],
            "Current (A)"
        );
    }

    #[test]
    fn chart_url_points_at_the_chart_endpoint() {
        let renderer = QuickChartRenderer::from_config(&ChartConfig::default()).unwrap();
        let url = renderer.chart_url(&spec()).unwrap();

        assert!(url.starts_with("https://quickchart.io/chart?"));
        assert!(url.contains("format=png"));
        assert!(url.contains("w=500"));
        // The Chart.js config is percent-encoded into the query string
        assert!(url.contains("c="));
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        let mut config = ChartConfig::default();
        config.quickchart_url = "not a url".to_string();
        assert!(QuickChartRenderer::from_config(&config).is_err());
    }
}
