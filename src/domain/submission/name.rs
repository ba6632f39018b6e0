//! src/domain/submission/name.rs
use unicode_segmentation::UnicodeSegmentation;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("A name must not be empty")]
    Empty,
    #[error("A name must not be more than 256 graphemes long")]
    TooLong,
    #[error("A name must not contain line breaks or other control characters")]
    ControlCharacters,
}

/// The sender's display name. It ends up verbatim in the e-mail subject,
/// so anything that could break a header line is refused.
#[derive(Debug, Clone)]
pub struct Name(String);

impl Name {
    pub fn parse(s: String) -> Result<Self, Error> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Empty);
        }

        // A grapheme is a "user-perceived" character: `å` is a single grapheme,
        // but it is composed of two characters (`a` and `̊`).
        if s.graphemes(true).count() > 256 {
            return Err(Error::TooLong);
        }

        if s.chars().any(char::is_control) {
            return Err(Error::ControlCharacters);
        }

        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
