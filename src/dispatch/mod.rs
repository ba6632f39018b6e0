//! src/dispatch/mod.rs
use crate::configuration::EmailSettings;
use crate::domain::Submission;
use crate::email::{Resend, SendError};

mod template;
pub use template::ContactEmail;

pub const ACKNOWLEDGEMENT: &str = "Thank you for reaching out! Your message has been sent.";

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("Contact form configuration missing")]
    MissingConfiguration(&'static str),
    #[error("Failed to send email")]
    Rejected(#[source] SendError),
    #[error("Failed to process your request")]
    Failed(#[source] SendError),
}

impl From<SendError> for DispatchError {
    fn from(e: SendError) -> Self {
        match e {
            SendError::Api { .. } => DispatchError::Rejected(e),
            SendError::Transport(_) => DispatchError::Failed(e),
        }
    }
}

/// Forwards validated submissions to the site owner's inbox.
#[derive(Debug)]
pub struct Dispatcher {
    resend: Resend,
    sender: Option<String>,
    recipient: Option<String>,
    site_name: String,
}

impl Dispatcher {
    pub fn new(settings: &EmailSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            resend: Resend::new(settings)?,
            sender: non_blank(settings.sender.as_deref()),
            recipient: non_blank(settings.recipient.as_deref()),
            site_name: settings.site_name.clone(),
        })
    }

    #[tracing::instrument(
        name = "Dispatching contact message",
        skip(self, submission),
        fields(sender_email = %submission.email)
    )]
    pub async fn dispatch(&self, submission: &Submission) -> Result<&'static str, DispatchError> {
        let (sender, recipient) = match (&self.sender, &self.recipient) {
            (Some(sender), Some(recipient)) => (sender, recipient),
            (None, _) => return Err(self.misconfigured("EMAIL_FROM")),
            (_, None) => return Err(self.misconfigured("EMAIL_TO")),
        };

        let rendered = ContactEmail::render(submission, &self.site_name);
        let email = self
            .resend
            .email_builder(sender)
            .to(recipient)
            .reply_to(submission.email.as_ref())
            .subject(&rendered.subject)
            .html(&rendered.html)
            .text(&rendered.text)
            .build();

        self.resend.send_email(&email).await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Failed to send contact email");
            DispatchError::from(e)
        })?;

        Ok(ACKNOWLEDGEMENT)
    }

    fn misconfigured(&self, setting: &'static str) -> DispatchError {
        tracing::error!(
            error.kind = "configuration",
            setting,
            "Contact form cannot send email because a setting is missing"
        );
        DispatchError::MissingConfiguration(setting)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
