//! Number intelligence errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntelError {
    /// The input could not be read as a phone number at all.
    #[error("{0}")]
    Parse(String),

    #[error("Unsupported description language: {0}")]
    UnsupportedLanguage(String),
}

impl IntelError {
    /// Whether the error comes from rejecting the number's structure,
    /// as opposed to a failure while looking it up.
    pub fn is_parse(&self) -> bool {
        matches!(self, IntelError::Parse(_))
    }
}
