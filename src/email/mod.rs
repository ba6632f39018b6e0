//! src/email/mod.rs
mod resend;
pub use resend::{Email, EmailBuilder, Resend, SendError, SentEmail};
