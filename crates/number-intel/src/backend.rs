//! [`NumberIntelligence`] backed by the `phonenumber` crate.

use crate::error::IntelError;
use crate::intelligence::NumberIntelligence;
use crate::regions::{regions, UNKNOWN_TIMEZONE};
use crate::types::{FormatStyle, NumberType, ParsedNumber};
use phonenumber::metadata::{Descriptor, Metadata, DATABASE};
use tracing::debug;

/// Languages the bundled descriptions are available in.
const SUPPORTED_LANGUAGES: &[&str] = &["en"];

/// Numbering-plan lookups over libphonenumber metadata and the bundled
/// region table.
///
/// Carrier allocation data is not shipped with the metadata, so
/// [`describe_carrier`](NumberIntelligence::describe_carrier) reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhonenumberIntelligence;

impl PhonenumberIntelligence {
    pub fn new() -> Self {
        Self
    }

    fn check_language(language: &str) -> Result<(), IntelError> {
        let primary = language.split(['-', '_']).next().unwrap_or_default();
        if SUPPORTED_LANGUAGES
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(primary))
        {
            Ok(())
        } else {
            Err(IntelError::UnsupportedLanguage(language.to_string()))
        }
    }

    /// Digits after the calling code in the E.164 rendering.
    fn significant_digits(number: &ParsedNumber) -> usize {
        let e164 = render(number, FormatStyle::E164);
        let total = e164.chars().filter(char::is_ascii_digit).count();
        let code_digits = number.country_calling_code().to_string().len();
        total.saturating_sub(code_digits)
    }
}

fn render(number: &ParsedNumber, style: FormatStyle) -> String {
    number
        .as_phone_number()
        .format()
        .mode(style.into())
        .to_string()
}

/// Whether `length` is a possible (or local-only possible) national number
/// length for any number type in the region's plan.
fn length_is_possible(metadata: &Metadata, length: u16) -> bool {
    let descriptors = metadata.descriptors();
    let typed: [Option<&Descriptor>; 10] = [
        descriptors.fixed_line(),
        descriptors.mobile(),
        descriptors.toll_free(),
        descriptors.premium_rate(),
        descriptors.shared_cost(),
        descriptors.personal_number(),
        descriptors.voip(),
        descriptors.pager(),
        descriptors.uan(),
        descriptors.voicemail(),
    ];

    std::iter::once(descriptors.general())
        .chain(typed.into_iter().flatten())
        .any(|descriptor| {
            descriptor.possible_length().contains(&length)
                || descriptor.possible_local_length().contains(&length)
        })
}

impl NumberIntelligence for PhonenumberIntelligence {
    fn parse(&self, number: &str) -> Result<ParsedNumber, IntelError> {
        phonenumber::parse(None, number)
            .map(ParsedNumber::from)
            .map_err(|e| {
                debug!(error = %e, "Number rejected by parser");
                IntelError::Parse(e.to_string())
            })
    }

    fn is_valid(&self, number: &ParsedNumber) -> bool {
        phonenumber::is_valid(number.as_phone_number())
    }

    fn is_possible(&self, number: &ParsedNumber) -> bool {
        let Some(plans) = DATABASE.by_code(&number.country_calling_code()) else {
            return false;
        };
        let Ok(length) = u16::try_from(Self::significant_digits(number)) else {
            return false;
        };

        plans
            .iter()
            .any(|metadata| length_is_possible(metadata, length))
    }

    fn describe_location(
        &self,
        number: &ParsedNumber,
        language: &str,
    ) -> Result<Option<String>, IntelError> {
        Self::check_language(language)?;

        if !self.is_valid(number) {
            return Ok(None);
        }

        Ok(self
            .region_code_for(number)
            .and_then(|code| regions().name(&code).map(String::from)))
    }

    fn describe_carrier(
        &self,
        _number: &ParsedNumber,
        language: &str,
    ) -> Result<Option<String>, IntelError> {
        Self::check_language(language)?;
        Ok(None)
    }

    /// Zones of the number's whole region, not of the area within it: the
    /// metadata carries no per-prefix timezone data, so a San Francisco
    /// number reports every US zone.
    fn timezones_for(&self, number: &ParsedNumber) -> Result<Vec<String>, IntelError> {
        let zones = if self.is_valid(number) {
            self.region_code_for(number)
                .and_then(|code| regions().get(&code).map(|info| info.timezones.clone()))
        } else {
            None
        };

        Ok(zones.unwrap_or_else(|| vec![UNKNOWN_TIMEZONE.to_string()]))
    }

    fn region_code_for(&self, number: &ParsedNumber) -> Option<String> {
        // Id variants are named after their ISO codes
        number
            .as_phone_number()
            .country()
            .id()
            .map(|id| format!("{id:?}"))
    }

    fn number_type(&self, number: &ParsedNumber) -> NumberType {
        number.as_phone_number().number_type(&DATABASE).into()
    }

    fn format(&self, number: &ParsedNumber, style: FormatStyle) -> Result<String, IntelError> {
        Ok(render(number, style))
    }
}
