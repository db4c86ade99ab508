// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Renderer-agnostic chart specification
//!
//! Assembles a declarative description of the V-I scatter plot with its best
//! fit line. The structure is plain serde-serializable data so any charting
//! backend (remote image-generation service, local rasterizer, browser-side
//! chart library) can consume it unmodified; turning it into pixels is the
//! `rendering` module's job.

use serde::{Deserialize, Serialize};

use super::{FitResult, Sample};

/// Axis title for the current axis
pub const CURRENT_AXIS_TITLE: &str = "Current (A)";
/// Axis title for the voltage axis
pub const VOLTAGE_AXIS_TITLE: &str = "Voltage (V)";
/// Label of the observed-samples series
pub const OBSERVED_SERIES_LABEL: &str = "Voltage vs Current";

/// One point in chart coordinates (x = current, y = voltage)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// One dataset of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Human-readable series label
    pub label: String,
    /// The series data, in order
    pub points: Vec<ChartPoint>,
    /// True if consecutive points are joined by a line segment
    pub connected: bool,
}

/// Axis description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
}

/// Declarative description of the scatter plot with best fit line
///
/// Contains exactly two series: the observed samples (unconnected points, no
/// implied ordering or interpolation between them) followed by the fit line
/// (two endpoint points spanning the observed current range, connected). The
/// fit coefficients ride along so consumers do not have to re-derive the
/// resistance estimate from the endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<ChartSeries>,
    /// The fit the line series was derived from
    pub fit: FitResult,
}

/// Build the chart specification for one snapshot and its fit
///
/// Pure function of its inputs, no side effects and no I/O. The samples must
/// be the same snapshot the fit was computed from; re-reading the store here
/// could pair a fit with boundary points from a different, later snapshot.
///
/// ### Parameters
///
/// * `samples` - the snapshot, at least two samples (guaranteed upstream by
///   the fit precondition)
/// * `fit` - the least-squares fit over exactly these samples
///
/// The fit-line series spans `[min(current), max(current)]` of the snapshot
/// and its label embeds the slope as a resistance value rounded to two
/// decimal places.
pub fn build_chart_spec(samples: &[Sample], fit: &FitResult) -> ChartSpec {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for sample in samples {
        x_min = x_min.min(sample.current);
        x_max = x_max.max(sample.current);
    }

    let observed = ChartSeries {
        label: OBSERVED_SERIES_LABEL.to_string(),
        points: samples
            .iter()
            .map(|s| ChartPoint {
                x: s.current,
                y: s.voltage,
            })
            .collect(),
        connected: false,
    };

    let fit_line = ChartSeries {
        label: format!("Best Fit Line (R = {:.2} Ω)", fit.slope),
        points: vec![
            ChartPoint {
                x: x_min,
                y: fit.predict(x_min),
            },
            ChartPoint {
                x: x_max,
                y: fit.predict(x_max),
            },
        ],
        connected: true,
    };

    ChartSpec {
        x_axis: AxisSpec {
            title: CURRENT_AXIS_TITLE.to_string(),
        },
        y_axis: AxisSpec {
            title: VOLTAGE_AXIS_TITLE.to_string(),
        },
        series: vec![observed, fit_line],
        fit: *fit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::fit;

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs
            .iter()
            .map(|&(current, voltage)| Sample::new(current, voltage).unwrap())
            .collect()
    }

    #[test]
    fn fit_line_spans_the_observed_current_range() {
        let samples = samples(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let result = fit(&samples).unwrap();
        let spec = build_chart_spec(&samples, &result);

        let line = &spec.series[1];
        assert!(line.connected);
        assert_eq!(line.points.len(), 2);
        assert_eq!(line.points[0].x, 1.0);
        assert_eq!(line.points[1].x, 3.0);
        for point in &line.points {
            let expected = result.slope * point.x + result.intercept;
            assert!((point.y - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn observed_series_mirrors_the_snapshot() {
        let samples = samples(&[(3.0, 6.0), (1.0, 2.0), (2.0, 4.0)]);
        let result = fit(&samples).unwrap();
        let spec = build_chart_spec(&samples, &result);

        let observed = &spec.series[0];
        assert!(!observed.connected);
        assert_eq!(observed.label, OBSERVED_SERIES_LABEL);
        assert_eq!(observed.points.len(), 3);
        // Insertion order preserved, no implied sorting
        assert_eq!(observed.points[0], ChartPoint { x: 3.0, y: 6.0 });
        assert_eq!(observed.points[1], ChartPoint { x: 1.0, y: 2.0 });
    }

    #[test]
    fn label_embeds_the_resistance_rounded_to_two_decimals() {
        let samples = samples(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let result = fit(&samples).unwrap();
        let spec = build_chart_spec(&samples, &result);

        assert_eq!(spec.series[1].label, "Best Fit Line (R = 2.00 Ω)");
        assert_eq!(spec.x_axis.title, CURRENT_AXIS_TITLE);
        assert_eq!(spec.y_axis.title, VOLTAGE_AXIS_TITLE);
    }

    #[test]
    fn spec_serializes_to_json() {
        let samples = samples(&[(1.0, 2.0), (2.0, 4.0)]);
        let result = fit(&samples).unwrap();
        let spec = build_chart_spec(&samples, &result);

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["x_axis"]["title"], "Current (A)");
        assert_eq!(json["series"].as_array().unwrap().len(), 2);
        assert_eq!(json["series"][1]["connected"], true);
        assert!(json["fit"]["slope"].is_number());
    }
}
