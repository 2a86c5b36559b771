//! PhoneTracer - phone number lookup service.
//!
//! Accepts a phone number over HTTP and reports:
//! - validity and possibility within its numbering plan
//! - region, location, carrier and timezones
//! - international, national and E.164 renderings

pub mod api;
pub mod config;
pub mod error;
pub mod tracker;

pub use config::Config;
pub use error::TrackError;
pub use tracker::{LookupResult, Tracker};
