//! Configuration management for urlsign tools.
//!
//! All configuration is driven by environment variables. Command line flags
//! in the binaries take precedence over anything loaded here.

use crate::error::{UrlSignError, UrlSignResult};

/// Number of random bytes in a freshly generated secret key.
///
/// Twenty bytes matches the size of the secrets issued by the signed-URL
/// scheme this crate family implements.
pub const DEFAULT_KEY_LENGTH: usize = 20;

/// Upper bound accepted for `KEY_LENGTH`.
pub const MAX_KEY_LENGTH: usize = 1024;

/// Global configuration for urlsign.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSignConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Path of the line-oriented key repository file.
    pub key_repository: String,
    /// Number of random bytes in a generated secret key.
    pub key_length: usize,
}

impl Default for UrlSignConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            key_repository: "keys.txt".to_owned(),
            key_length: DEFAULT_KEY_LENGTH,
        }
    }
}

impl UrlSignConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOG_LEVEL` | `info` |
    /// | `KEY_REPOSITORY` | `keys.txt` |
    /// | `KEY_LENGTH` | `20` |
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignError::Config`] if `KEY_LENGTH` is not an integer in
    /// `1..=1024`.
    pub fn from_env() -> UrlSignResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is this function backed by the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> UrlSignResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("KEY_REPOSITORY") {
            config.key_repository = v;
        }
        if let Some(v) = lookup("KEY_LENGTH") {
            config.key_length = parse_key_length(&v)?;
        }

        Ok(config)
    }
}

fn parse_key_length(value: &str) -> UrlSignResult<usize> {
    let invalid = |reason: &str| UrlSignError::Config {
        name: "KEY_LENGTH",
        value: value.to_owned(),
        reason: reason.to_owned(),
    };

    let length: usize = value
        .trim()
        .parse()
        .map_err(|_| invalid("not an unsigned integer"))?;

    if length == 0 || length > MAX_KEY_LENGTH {
        return Err(invalid("must be between 1 and 1024"));
    }

    Ok(length)
}
