//! src/captcha/turnstile.rs
use crate::configuration::TurnstileSettings;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum VerificationError {
    #[error("Captcha token is required")]
    MissingToken,
    #[error("{}", describe_rejection(.error_codes))]
    Rejected { error_codes: Vec<String> },
    #[error("Failed to validate captcha")]
    Unreachable(#[source] reqwest::Error),
}

fn describe_rejection(error_codes: &[String]) -> String {
    if error_codes.is_empty() {
        "Captcha validation failed".to_string()
    } else {
        format!("Captcha validation failed: {}", error_codes.join(", "))
    }
}

/// Body of a siteverify response. Only `success` is always present.
#[derive(Debug, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub challenge_ts: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

impl VerificationResult {
    pub fn ensure_success(self) -> Result<Self, VerificationError> {
        if self.success {
            Ok(self)
        } else {
            Err(VerificationError::Rejected {
                error_codes: self.error_codes,
            })
        }
    }
}

#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    remoteip: Option<&'a str>,
}

#[derive(Debug)]
pub struct TurnstileClient {
    http_client: Client,
    verify_url: String,
    secret_key: Secret<String>,
    forward_client_ip: bool,
}

impl TurnstileClient {
    pub fn new(settings: &TurnstileSettings) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            http_client,
            verify_url: settings.verify_url.clone(),
            secret_key: settings.secret_key.clone(),
            forward_client_ip: settings.forward_client_ip,
        })
    }

    pub fn forwards_client_ip(&self) -> bool {
        self.forward_client_ip
    }

    /// Asks the siteverify endpoint about `token`. A missing token never
    /// reaches the network. A response with `success: false` is still
    /// `Ok`; use [`VerificationResult::ensure_success`] to reject it.
    #[tracing::instrument(name = "Verifying captcha token", skip(self, token))]
    pub async fn verify(
        &self,
        token: Option<&str>,
        remote_ip: Option<&str>,
    ) -> Result<VerificationResult, VerificationError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(VerificationError::MissingToken),
        };

        let request = SiteverifyRequest {
            secret: self.secret_key.expose_secret(),
            response: token,
            remoteip: remote_ip,
        };

        let result: VerificationResult = self
            .http_client
            .post(&self.verify_url)
            .form(&request)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(VerificationError::Unreachable)?
            .json()
            .await
            .map_err(VerificationError::Unreachable)?;

        if !result.success {
            tracing::warn!(
                error_codes = ?result.error_codes,
                "Captcha token was rejected by the verifier"
            );
        } else {
            tracing::debug!(
                hostname = ?result.hostname,
                challenge_ts = ?result.challenge_ts,
                action = ?result.action,
                "Captcha token verified"
            );
        }

        Ok(result)
    }
}
