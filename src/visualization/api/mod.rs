// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-ohmbench project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Telemetry API route handlers
//!
//! Handlers are split by HTTP verb, mirroring the wire protocol of the bench
//! controller firmware: the controller POSTs measurements, the consumer
//! application GETs state and the derived plot. All failure responses share
//! the structured [`ErrorBody`] shape so callers can distinguish error kinds
//! without parsing prose.

pub mod get;
pub mod post;

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::Serialize;

use crate::telemetry::TelemetryError;

pub use get::data::*;
pub use get::graph::*;
pub use post::readings::*;
pub use post::update::*;

/// Structured failure body returned by every endpoint
///
/// `kind` is a stable machine-readable discriminator; `error` is the
/// human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub kind: &'static str,
    pub error: String,
}

/// Alias for the failure half of every handler result
pub type ApiError = status::Custom<Json<ErrorBody>>;

/// Build a structured failure response
pub fn api_error(status: Status, kind: &'static str, error: String) -> ApiError {
    status::Custom(
        status,
        Json(ErrorBody {
            success: false,
            kind,
            error,
        }),
    )
}

/// Map a core error signal to its HTTP representation
///
/// `InvalidSample` and `InsufficientData` are caller errors (400); a
/// degenerate fit is a well-formed request over data that cannot determine a
/// line (422). No core error ever surfaces as a generic internal fault.
pub fn telemetry_error(err: &TelemetryError) -> ApiError {
    let (status, kind) = match err {
        TelemetryError::InvalidSample { .. } => (Status::BadRequest, "invalid_sample"),
        TelemetryError::InsufficientData { .. } => (Status::BadRequest, "insufficient_data"),
        TelemetryError::DegenerateFit => (Status::UnprocessableEntity, "degenerate_fit"),
    };
    api_error(status, kind, err.to_string())
}

/// Extract a finite number from an optional JSON value
///
/// The reading endpoint accepts raw JSON values so that a missing field, a
/// string, or a non-finite number all map to the same typed
/// [`TelemetryError::InvalidSample`] naming the offending field, instead of a
/// framework-generic parse failure.
pub fn extract_finite(
    value: Option<&serde_json::Value>,
    field: &'static str,
) -> Result<f64, TelemetryError> {
    value
        .and_then(serde_json::Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or(TelemetryError::InvalidSample { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_finite_accepts_numbers_only() {
        assert_eq!(extract_finite(Some(&json!(1.5)), "current"), Ok(1.5));
        assert_eq!(extract_finite(Some(&json!(0)), "current"), Ok(0.0));

        let err = TelemetryError::InvalidSample { field: "current" };
        assert_eq!(extract_finite(None, "current"), Err(err.clone()));
        assert_eq!(extract_finite(Some(&json!("12")), "current"), Err(err.clone()));
        assert_eq!(extract_finite(Some(&json!(null)), "current"), Err(err.clone()));
        assert_eq!(extract_finite(Some(&json!([1.0])), "current"), Err(err));
    }

    #[test]
    fn error_kinds_are_distinguishable() {
        let invalid = telemetry_error(&TelemetryError::InvalidSample { field: "voltage" });
        assert_eq!(invalid.0, Status::BadRequest);
        assert_eq!(invalid.1.kind, "invalid_sample");

        let insufficient = telemetry_error(&TelemetryError::InsufficientData { have: 1, min: 2 });
        assert_eq!(insufficient.0, Status::BadRequest);
        assert_eq!(insufficient.1.kind, "insufficient_data");

        let degenerate = telemetry_error(&TelemetryError::DegenerateFit);
        assert_eq!(degenerate.0, Status::UnprocessableEntity);
        assert_eq!(degenerate.1.kind, "degenerate_fit");
    }
}
