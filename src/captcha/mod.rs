//! src/captcha/mod.rs
mod turnstile;
pub use turnstile::{TurnstileClient, VerificationError, VerificationResult};
