//! Lookup request and result types.

use serde::Serialize;

/// Body of `POST /api/track`, as read by [`parse_request`](super::parse_request).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    /// Number as typed by the client, with or without a leading `+`; `None`
    /// when the key is absent
    pub phone_number: Option<String>,
}

/// Everything reported about one number.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LookupResult {
    /// The normalized input (leading `+` enforced), not the E.164 rendering
    pub phone_number: String,
    pub is_valid: bool,
    pub is_possible: bool,
    pub location: String,
    pub carrier: String,
    pub carrier_note: String,
    pub timezones: Vec<String>,
    /// ISO region code, or "Unknown"
    pub country_code: String,
    pub flag: String,
    pub number_type: String,
    pub formatted: FormattedNumbers,
}

/// The number rendered in each supported style.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormattedNumbers {
    pub international: String,
    pub national: String,
    pub e164: String,
}
