//! src/email/resend/mod.rs
use crate::configuration::EmailSettings;
use reqwest::Client;
use serde::Serialize;

mod email;
pub use email::{Email, EmailBuilder, SendError, SentEmail};
use email::EmailClient;

/// Client for the Resend transactional e-mail API.
#[derive(Debug)]
pub struct Resend {
    email_client: EmailClient,
}

impl Resend {
    pub fn new(settings: &EmailSettings) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        let email_client = EmailClient {
            http_client,
            url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        };

        Ok(Self { email_client })
    }

    pub fn email_builder<'a>(&self, from: &'a str) -> EmailBuilder<'a> {
        EmailBuilder::new(from)
    }

    #[tracing::instrument(name = "Sending email through Resend", skip(self, email))]
    pub async fn send_email<T>(&self, email: &T) -> Result<SentEmail, SendError>
    where
        T: Serialize,
    {
        let sent = self.email_client.send_email(email).await?;
        tracing::info!(email_id = %sent.id, "Email accepted by Resend");
        Ok(sent)
    }
}
