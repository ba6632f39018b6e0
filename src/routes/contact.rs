//! src/routes/contact.rs
use crate::captcha::{TurnstileClient, VerificationError};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::domain::Submission;
use crate::routes::error_chain_fmt;
use actix_web::error::UrlencodedError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, alias = "cf-turnstile-response")]
    pub token: Option<String>,
}

#[derive(Serialize)]
struct Acknowledgement<'a> {
    success: &'a str,
}

#[derive(Serialize)]
struct Failure {
    error: String,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ContactError::Verification(VerificationError::Unreachable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ContactError::Verification(_) => StatusCode::BAD_REQUEST,
            ContactError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Display of every variant is the short user-facing text; sources
        // carrying upstream detail are only reached through `Debug`.
        HttpResponse::build(self.status_code()).json(Failure {
            error: self.to_string(),
        })
    }
}

/// Upper bound for an encoded submission. A maximal message is 5000
/// graphemes of up to 4 UTF-8 bytes, each percent-encoded to 3 characters,
/// leaving room for the name, the address and the token.
pub const FORM_LIMIT_BYTES: usize = 96 * 1024;

/// Form extraction settings for `/contact`. Extractor failures are answered
/// with the same JSON body as every other rejected submission.
pub fn contact_form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let message = match &err {
                UrlencodedError::Overflow { .. } => "The submission is too large".to_string(),
                _ => err.to_string(),
            };
            tracing::warn!(error.cause_chain = ?err, "Failed to extract contact form");
            ContactError::InvalidInput(message).into()
        })
}

#[tracing::instrument(
    name = "Handling a contact submission",
    skip(form, req, turnstile, dispatcher),
    fields(
        request_id = %Uuid::new_v4(),
        sender_email = %form.email,
        sender_name = %form.name
    )
)]
pub async fn submit(
    form: web::Form<ContactForm>,
    req: HttpRequest,
    turnstile: web::Data<TurnstileClient>,
    dispatcher: web::Data<Dispatcher>,
) -> Result<HttpResponse, ContactError> {
    let form = form.into_inner();
    let token = form.token.clone();

    let submission =
        Submission::try_from(form).map_err(|e| ContactError::InvalidInput(e.to_string()))?;

    let client_ip = if turnstile.forwards_client_ip() {
        client_ip(&req)
    } else {
        None
    };

    turnstile
        .verify(token.as_deref(), client_ip.map(|ip| ip.to_string()).as_deref())
        .await?
        .ensure_success()?;

    let acknowledgement = dispatcher.dispatch(&submission).await?;

    Ok(HttpResponse::Ok().json(Acknowledgement {
        success: acknowledgement,
    }))
}

/// Address of the submitter as seen by the edge: Cloudflare's header first,
/// then `Forwarded`/`X-Forwarded-For`, then the peer address.
fn client_ip(req: &HttpRequest) -> Option<IpAddr> {
    if let Some(ip) = req
        .headers()
        .get("CF-Connecting-IP")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_ip)
    {
        return Some(ip);
    }

    let connection_info = req.connection_info();
    connection_info.realip_remote_addr().and_then(parse_ip)
}

fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<IpAddr>()
        .ok()
        .or_else(|| value.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}
