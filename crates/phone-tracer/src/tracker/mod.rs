//! The lookup handler: request validation and response shaping.
//!
//! Transport-agnostic. The HTTP adapter in [`crate::api`] hands it the raw
//! request body; a function-per-request host can call [`Tracker::handle`]
//! directly.

mod flag;
mod types;

pub use flag::{flag_for_region, GLOBE};
pub use types::{FormattedNumbers, LookupRequest, LookupResult};

use crate::api::ApiResponse;
use crate::error::TrackError;
use axum::http::StatusCode;
use number_intel::{FormatStyle, NumberIntelligence, PhonenumberIntelligence};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Advisory attached to every carrier answer.
pub const CARRIER_NOTE: &str =
    "Info based on original series allocation. Ported numbers (MNP) may differ.";

/// Placeholder for location, carrier and region when nothing is known.
pub const UNKNOWN: &str = "Unknown";

const DESCRIPTION_LANGUAGE: &str = "en";

/// Answers lookup requests against a [`NumberIntelligence`] backend.
#[derive(Clone)]
pub struct Tracker {
    intel: Arc<dyn NumberIntelligence>,
}

impl Tracker {
    pub fn new(intel: Arc<dyn NumberIntelligence>) -> Self {
        Self { intel }
    }

    /// Tracker over the bundled libphonenumber metadata.
    pub fn with_default_intelligence() -> Self {
        Self::new(Arc::new(PhonenumberIntelligence::new()))
    }

    /// Handle one raw request body, producing the status and JSON envelope
    /// to send back.
    pub fn handle(&self, raw_body: &[u8]) -> (StatusCode, Value) {
        let outcome = self.track(raw_body).and_then(|result| {
            serde_json::to_value(ApiResponse::success(result))
                .map_err(|e| TrackError::Internal(e.to_string()))
        });

        match outcome {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => (e.status(), error_body(&e)),
        }
    }

    /// Validate the raw body and look the number up.
    pub fn track(&self, raw_body: &[u8]) -> Result<LookupResult, TrackError> {
        let request = parse_request(raw_body)?;
        let number = normalize(request.phone_number.as_deref())?;
        self.lookup(&number)
    }

    /// Look up an already normalized number.
    pub fn lookup(&self, phone_number: &str) -> Result<LookupResult, TrackError> {
        let parsed = self.intel.parse(phone_number).map_err(|e| {
            info!(phone_number, error = %e, "Rejected unparsable number");
            TrackError::from(e)
        })?;

        let intel = self.intel.as_ref();
        let region = intel.region_code_for(&parsed).filter(|code| !code.is_empty());

        let result = LookupResult {
            phone_number: phone_number.to_string(),
            is_valid: intel.is_valid(&parsed),
            is_possible: intel.is_possible(&parsed),
            location: or_unknown(
                intel
                    .describe_location(&parsed, DESCRIPTION_LANGUAGE)
                    .map_err(internal)?,
            ),
            carrier: or_unknown(
                intel
                    .describe_carrier(&parsed, DESCRIPTION_LANGUAGE)
                    .map_err(internal)?,
            ),
            carrier_note: CARRIER_NOTE.to_string(),
            timezones: intel.timezones_for(&parsed).map_err(internal)?,
            flag: flag_for_region(region.as_deref()),
            country_code: or_unknown(region),
            number_type: intel.number_type(&parsed).label().to_string(),
            formatted: FormattedNumbers {
                international: intel
                    .format(&parsed, FormatStyle::International)
                    .map_err(internal)?,
                national: intel
                    .format(&parsed, FormatStyle::National)
                    .map_err(internal)?,
                e164: intel.format(&parsed, FormatStyle::E164).map_err(internal)?,
            },
        };

        debug!(
            phone_number,
            country_code = %result.country_code,
            number_type = %result.number_type,
            is_valid = result.is_valid,
            "Lookup complete"
        );

        Ok(result)
    }
}

/// Decode the request body.
///
/// Only malformed JSON is the client's fault. A body that is not UTF-8, a
/// top-level value other than an object, or a `phone_number` that is present
/// but not a string (including `null`) is reported as an internal error.
pub fn parse_request(raw_body: &[u8]) -> Result<LookupRequest, TrackError> {
    let text = std::str::from_utf8(raw_body).map_err(|e| {
        debug!(error = %e, "Request body is not UTF-8");
        TrackError::Internal(format!("request body is not valid UTF-8: {e}"))
    })?;

    let value: Value = serde_json::from_str(text).map_err(|e| {
        debug!(error = %e, "Malformed JSON body");
        TrackError::InvalidJson
    })?;

    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(TrackError::Internal(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    let phone_number = match fields.remove("phone_number") {
        None => None,
        Some(Value::String(number)) => Some(number),
        Some(other) => {
            return Err(TrackError::Internal(format!(
                "phone_number must be a string, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(LookupRequest { phone_number })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Trim the submitted number and enforce a leading `+`.
pub fn normalize(raw: Option<&str>) -> Result<String, TrackError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(TrackError::MissingPhoneNumber);
    }

    if trimmed.starts_with('+') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("+{trimmed}"))
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn internal(e: number_intel::IntelError) -> TrackError {
    warn!(error = %e, "Lookup failed");
    TrackError::Internal(e.to_string())
}

fn error_body(e: &TrackError) -> Value {
    let body: ApiResponse<()> = ApiResponse::error(e.to_string());
    serde_json::to_value(body).unwrap_or_else(|_| {
        serde_json::json!({ "success": false, "error": e.to_string() })
    })
}
