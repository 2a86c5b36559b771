//! Number intelligence types.

use phonenumber::PhoneNumber;
use serde::Serialize;
use std::fmt;

/// A phone number accepted by the parser.
///
/// Opaque to callers; only the [`NumberIntelligence`](crate::NumberIntelligence)
/// implementation that produced it knows how to inspect it.
#[derive(Debug, Clone)]
pub struct ParsedNumber {
    inner: PhoneNumber,
}

impl ParsedNumber {
    /// Wrap a number parsed by the `phonenumber` crate.
    pub fn new(inner: PhoneNumber) -> Self {
        Self { inner }
    }

    /// Borrow the underlying parsed number.
    pub fn as_phone_number(&self) -> &PhoneNumber {
        &self.inner
    }

    /// Numeric country calling code (e.g. `44` for the UK).
    pub fn country_calling_code(&self) -> u16 {
        self.inner.code().value()
    }
}

impl From<PhoneNumber> for ParsedNumber {
    fn from(inner: PhoneNumber) -> Self {
        Self::new(inner)
    }
}

/// Classification of a number within its numbering plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumberType {
    FixedLine,
    Mobile,
    FixedLineOrMobile,
    TollFree,
    PremiumRate,
    SharedCost,
    Voip,
    PersonalNumber,
    Pager,
    Uan,
    Voicemail,
    Unknown,
}

impl NumberType {
    /// Human-readable label shown to clients.
    pub fn label(self) -> &'static str {
        match self {
            NumberType::FixedLine => "Fixed Line",
            NumberType::Mobile => "Mobile",
            NumberType::FixedLineOrMobile => "Fixed Line or Mobile",
            NumberType::TollFree => "Toll Free",
            NumberType::PremiumRate => "Premium Rate",
            NumberType::SharedCost => "Shared Cost",
            NumberType::Voip => "VoIP",
            NumberType::PersonalNumber => "Personal Number",
            NumberType::Pager => "Pager",
            NumberType::Uan => "UAN",
            NumberType::Voicemail => "Voicemail",
            NumberType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<phonenumber::Type> for NumberType {
    fn from(kind: phonenumber::Type) -> Self {
        use phonenumber::Type;

        match kind {
            Type::FixedLine => NumberType::FixedLine,
            Type::Mobile => NumberType::Mobile,
            Type::FixedLineOrMobile => NumberType::FixedLineOrMobile,
            Type::TollFree => NumberType::TollFree,
            Type::PremiumRate => NumberType::PremiumRate,
            Type::SharedCost => NumberType::SharedCost,
            Type::Voip => NumberType::Voip,
            Type::PersonalNumber => NumberType::PersonalNumber,
            Type::Pager => NumberType::Pager,
            Type::Uan => NumberType::Uan,
            Type::Voicemail => NumberType::Voicemail,
            // Emergency, short codes, carrier-specific and the like have no label
            _ => NumberType::Unknown,
        }
    }
}

/// Rendering style for [`NumberIntelligence::format`](crate::NumberIntelligence::format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatStyle {
    /// `+44 20 7183 8750`
    International,
    /// `020 7183 8750`
    National,
    /// `+442071838750`
    E164,
}

impl From<FormatStyle> for phonenumber::Mode {
    fn from(style: FormatStyle) -> Self {
        match style {
            FormatStyle::International => phonenumber::Mode::International,
            FormatStyle::National => phonenumber::Mode::National,
            FormatStyle::E164 => phonenumber::Mode::E164,
        }
    }
}
