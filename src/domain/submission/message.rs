//! src/domain/submission/message.rs
use unicode_segmentation::UnicodeSegmentation;

pub const MAX_GRAPHEMES: usize = 5000;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("A message must not be empty")]
    Empty,
    #[error("A message must not be more than 5000 graphemes long")]
    TooLong,
}

/// Free text typed into the contact form. Line breaks are kept.
#[derive(Debug, Clone)]
pub struct Message(String);

impl Message {
    pub fn parse(s: String) -> Result<Self, Error> {
        if s.trim().is_empty() {
            return Err(Error::Empty);
        }

        if s.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(Error::TooLong);
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
