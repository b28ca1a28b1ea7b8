//! Error types for the urlsign core.

/// Core error type for urlsign infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum UrlSignError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {name}={value:?}: {reason}")]
    Config {
        /// Name of the offending variable.
        name: &'static str,
        /// The raw value that was rejected.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Convenience result type for urlsign operations.
pub type UrlSignResult<T> = Result<T, UrlSignError>;
