//! Configuration and shared error types for urlsign.
//!
//! This crate holds the pieces every urlsign binary needs before it touches
//! any signing material: environment-driven configuration and the error type
//! used to report configuration problems.

mod config;
mod error;

pub use config::{DEFAULT_KEY_LENGTH, MAX_KEY_LENGTH, UrlSignConfig};
pub use error::{UrlSignError, UrlSignResult};
