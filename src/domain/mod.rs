//! src/domain/mod.rs
mod submission;
pub use submission::*;
