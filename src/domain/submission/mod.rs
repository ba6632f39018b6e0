//! src/domain/submission/mod.rs
mod name;
pub use name::Name;

mod email;
pub use email::Email;

mod message;
pub use message::{Message, MAX_GRAPHEMES as MAX_MESSAGE_GRAPHEMES};

use crate::routes::ContactForm;

#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Name(#[from] name::Error),
    #[error(transparent)]
    Email(#[from] email::Error),
    #[error(transparent)]
    Message(#[from] message::Error),
}

/// A contact form submission whose fields have been validated.
/// The bot-check token is handled separately by the verifier.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: Name,
    pub email: Email,
    pub message: Message,
}

impl Submission {
    pub fn parse(name: String, email: String, message: String) -> Result<Self, SubmissionError> {
        Ok(Self {
            name: Name::parse(name)?,
            email: Email::parse(email)?,
            message: Message::parse(message)?,
        })
    }
}

impl TryFrom<ContactForm> for Submission {
    type Error = SubmissionError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        Self::parse(form.name, form.email, form.message)
    }
}
