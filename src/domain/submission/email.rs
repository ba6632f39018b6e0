//! src/domain/submission/email.rs
use validator::validate_email;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An email address must not be empty")]
    Empty,
    #[error("{0} is not a valid email address")]
    Invalid(String),
}

/// The address the site owner replies to.
#[derive(Debug, Clone)]
pub struct Email(String);

impl Email {
    pub fn parse(s: String) -> Result<Self, Error> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Empty);
        }

        if validate_email(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::Invalid(s.to_string()))
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
