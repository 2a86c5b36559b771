//! Flag emoji for region codes.

/// Shown when a number cannot be tied to a region.
pub const GLOBE: &str = "🌐";

/// Offset from an uppercase ASCII letter to its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Flag emoji for a two-letter region code.
///
/// Absent codes, the literal "Unknown" and anything that is not two ASCII
/// letters fall back to [`GLOBE`].
pub fn flag_for_region(code: Option<&str>) -> String {
    let Some(code) = code.map(str::trim) else {
        return GLOBE.to_string();
    };

    if code == "Unknown" || code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return GLOBE.to_string();
    }

    code.chars()
        .map(|c| char::from_u32(c.to_ascii_uppercase() as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect::<Option<String>>()
        .unwrap_or_else(|| GLOBE.to_string())
}
