// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Ordinary least-squares linear fit over accumulated samples
//!
//! Fits `voltage = slope * current + intercept` to a snapshot of the reading
//! store. The slope is interpreted downstream as an estimate of electrical
//! resistance (volts per ampere), the intercept as the voltage-axis offset.
//!
//! The fit is recomputed fresh on every plot request and never cached: the
//! store can change between requests and a stale fit would silently mislead
//! the consumer.

use serde::{Deserialize, Serialize};

use super::{Sample, TelemetryError};

/// Minimum number of samples needed to determine a line
pub const MIN_FIT_SAMPLES: usize = 2;

/// Result of a least-squares fit over one store snapshot
///
/// Derived, never stored. Satisfies `voltage ≈ slope * current + intercept`
/// with minimal squared residuals over the snapshot it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Volts per ampere, the resistance estimate
    pub slope: f64,
    /// Voltage-axis offset in volts
    pub intercept: f64,
}

impl FitResult {
    /// Predicted voltage at the given current
    pub fn predict(&self, current: f64) -> f64 {
        self.slope * current + self.intercept
    }
}

/// Compute the ordinary least-squares line through the given samples
///
/// Uses the closed form
///
/// ```text
/// slope     = (n * Σxy - Σx * Σy) / (n * Σx² - (Σx)²)
/// intercept = (Σy - slope * Σx) / n
/// ```
///
/// with `x` = current and `y` = voltage.
///
/// ### Parameters
///
/// * `samples` - the snapshot to fit; every sample is finite by construction
///
/// ### Returns
///
/// * [`TelemetryError::InsufficientData`] when fewer than
///   [`MIN_FIT_SAMPLES`] samples are given (a single point or no points
///   cannot determine a line)
/// * [`TelemetryError::DegenerateFit`] when all currents are identical
///   (vertical line, infinite slope); the check runs before any division so
///   NaN or infinity can never escape
pub fn fit(samples: &[Sample]) -> Result<FitResult, TelemetryError> {
    let n = samples.len();
    if n < MIN_FIT_SAMPLES {
        return Err(TelemetryError::InsufficientData {
            have: n,
            min: MIN_FIT_SAMPLES,
        });
    }

    let n_f = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for sample in samples {
        sum_x += sample.current;
        sum_y += sample.voltage;
        sum_xy += sample.current * sample.voltage;
        sum_xx += sample.current * sample.current;
    }

    // Relative epsilon: identical non-dyadic currents can leave rounding dust
    // in the closed-form denominator instead of an exact zero.
    let denominator = n_f * sum_xx - sum_x * sum_x;
    if denominator.abs() <= f64::EPSILON * n_f * sum_xx.abs().max(1.0) {
        return Err(TelemetryError::DegenerateFit);
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;

    Ok(FitResult { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs
            .iter()
            .map(|&(current, voltage)| Sample::new(current, voltage).unwrap())
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fits_the_identity_line() {
        let result = fit(&samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).unwrap();
        assert_close(result.slope, 1.0);
        assert_close(result.intercept, 0.0);
    }

    #[test]
    fn fits_a_two_ohm_resistor() {
        let result = fit(&samples(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)])).unwrap();
        assert_close(result.slope, 2.0);
        assert_close(result.intercept, 0.0);
        assert_close(result.predict(1.5), 3.0);
    }

    #[test]
    fn fits_a_line_with_offset() {
        // voltage = 3 * current + 1
        let result = fit(&samples(&[(0.0, 1.0), (1.0, 4.0), (2.0, 7.0), (3.0, 10.0)])).unwrap();
        assert_close(result.slope, 3.0);
        assert_close(result.intercept, 1.0);
    }

    #[test]
    fn noisy_samples_still_produce_finite_coefficients() {
        let result = fit(&samples(&[
            (0.1, 0.21),
            (0.2, 0.39),
            (0.3, 0.61),
            (0.4, 0.80),
        ]))
        .unwrap();
        assert!(result.slope.is_finite());
        assert!(result.intercept.is_finite());
        assert!((result.slope - 2.0).abs() < 0.1);
    }

    #[test]
    fn identical_currents_signal_degenerate_fit() {
        assert_eq!(
            fit(&samples(&[(1.0, 5.0), (1.0, 7.0)])),
            Err(TelemetryError::DegenerateFit)
        );
    }

    #[test]
    fn identical_non_dyadic_currents_signal_degenerate_fit() {
        // 0.1 is not exactly representable, the denominator may not be an
        // exact zero without the relative-epsilon check
        assert_eq!(
            fit(&samples(&[(0.1, 1.0), (0.1, 2.0), (0.1, 3.0)])),
            Err(TelemetryError::DegenerateFit)
        );
    }

    #[test]
    fn too_few_samples_signal_insufficient_data() {
        assert_eq!(
            fit(&[]),
            Err(TelemetryError::InsufficientData { have: 0, min: 2 })
        );
        assert_eq!(
            fit(&samples(&[(1.0, 1.0)])),
            Err(TelemetryError::InsufficientData { have: 1, min: 2 })
        );
    }
}
