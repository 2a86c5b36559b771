//! The lookup capability consumed by the tracker.

use crate::error::IntelError;
use crate::types::{FormatStyle, NumberType, ParsedNumber};

/// Everything the tracker needs to know about a phone number.
///
/// Implementations are stateless over shared, read-only numbering-plan data
/// and are called concurrently from request handlers.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait NumberIntelligence: Send + Sync {
    /// Parse an international number (no default region is assumed).
    fn parse(&self, number: &str) -> Result<ParsedNumber, IntelError>;

    /// Whether the number matches an assigned pattern in its numbering plan.
    fn is_valid(&self, number: &ParsedNumber) -> bool;

    /// Whether the number has a plausible length for its calling code.
    fn is_possible(&self, number: &ParsedNumber) -> bool;

    /// Geographic description in `language`, `None` when nothing is known.
    fn describe_location(
        &self,
        number: &ParsedNumber,
        language: &str,
    ) -> Result<Option<String>, IntelError>;

    /// Name of the carrier the number range was allocated to.
    fn describe_carrier(
        &self,
        number: &ParsedNumber,
        language: &str,
    ) -> Result<Option<String>, IntelError>;

    /// IANA timezone identifiers the number may be located in.
    ///
    /// Implementations without per-prefix timezone data may answer at the
    /// region level, listing every zone of the number's region.
    fn timezones_for(&self, number: &ParsedNumber) -> Result<Vec<String>, IntelError>;

    /// ISO 3166-1 alpha-2 region of the number's numbering plan.
    fn region_code_for(&self, number: &ParsedNumber) -> Option<String>;

    fn number_type(&self, number: &ParsedNumber) -> NumberType;

    fn format(&self, number: &ParsedNumber, style: FormatStyle) -> Result<String, IntelError>;
}
