//! src/email/resend/email.rs
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Request body of `POST /emails`.
#[derive(Debug, Serialize)]
pub struct Email<'a> {
    pub from: &'a str,
    pub to: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a str>,
    pub subject: &'a str,
    pub html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

pub struct EmailBuilder<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: Option<&'a str>,
}

impl<'a> EmailBuilder<'a> {
    pub fn new(from: &'a str) -> Self {
        Self {
            from,
            to: vec![],
            reply_to: None,
            subject: "",
            html: "",
            text: None,
        }
    }

    pub fn to(mut self, address: &'a str) -> Self {
        self.to.push(address);
        self
    }

    pub fn reply_to(mut self, address: &'a str) -> Self {
        self.reply_to = Some(address);
        self
    }

    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = subject;
        self
    }

    pub fn html(mut self, html: &'a str) -> Self {
        self.html = html;
        self
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    pub fn build(self) -> Email<'a> {
        Email {
            from: self.from,
            to: self.to,
            reply_to: self.reply_to,
            subject: self.subject,
            html: self.html,
            text: self.text,
        }
    }
}

/// Successful response: the id Resend assigned to the message.
#[derive(Debug, Deserialize)]
pub struct SentEmail {
    pub id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum SendError {
    #[error("Email service rejected the request with {status} {name}: {message}")]
    Api {
        status: StatusCode,
        name: String,
        message: String,
    },
    #[error("Failed to reach the email service")]
    Transport(#[source] reqwest::Error),
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: String,
    pub api_key: Secret<String>,
}

impl EmailClient {
    pub async fn send_email<T>(&self, email: &T) -> Result<SentEmail, SendError>
    where
        T: Serialize,
    {
        let res = self
            .http_client
            .post(format!("{}/emails", self.url))
            .bearer_auth(self.api_key.expose_secret())
            .header("accept", "application/json")
            .json(&email)
            .send()
            .await
            .map_err(SendError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let (name, message) = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(error) => (error.name, error.message),
                Err(_) => (String::new(), body),
            };
            return Err(SendError::Api {
                status,
                name,
                message,
            });
        }

        res.json().await.map_err(SendError::Transport)
    }
}
