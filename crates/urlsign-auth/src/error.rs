//! Error types for signed-URL authentication.
//!
//! Every failure in key minting, signing, URL validation, repository loading,
//! and authentication is represented by [`AuthError`]. Each variant carries the
//! value that caused it so a failure can be diagnosed without re-deriving it.
//!
//! Callers serving untrusted requesters should collapse all variants into a
//! single generic rejection; the distinction between a structural defect and a
//! signature mismatch is for operators, not clients.

use crate::codec::DecodeError;

/// Errors that can occur while minting keys, signing, or authenticating URLs.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The randomness source failed or the requested key size is unusable.
    #[error("key generation failed: {0}")]
    KeyGeneration(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The URL could not be parsed.
    #[error("malformed URL {url:?}")]
    MalformedUrl {
        /// The raw URL.
        url: String,
        /// The parser's complaint.
        #[source]
        source: http::uri::InvalidUri,
    },

    /// The query string could not be decoded into parameters.
    #[error("malformed query {query:?}: {reason}")]
    MalformedQuery {
        /// The raw query string.
        query: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A URL to be signed has no `client` parameter.
    #[error("URL to be signed must have a client parameter: {0}")]
    MissingClientParameter(String),

    /// A URL to be signed already carries a `signature` parameter.
    #[error("URL to be signed must not have a signature parameter: {0}")]
    UnexpectedSignatureParameter(String),

    /// A signed URL does not carry exactly one `client` parameter.
    #[error("signed URL must contain exactly one client parameter, found {count}")]
    MissingOrDuplicateClient {
        /// Number of `client` values present.
        count: usize,
    },

    /// A signed URL does not carry exactly one `signature` parameter.
    #[error("signed URL must contain exactly one signature parameter, found {count}")]
    MissingOrDuplicateSignature {
        /// Number of `signature` values present.
        count: usize,
    },

    /// The shared secret is not valid URL-safe base64.
    #[error("invalid key encoding")]
    InvalidKeyEncoding(#[source] DecodeError),

    /// The HMAC implementation refused the decoded key.
    #[error("HMAC key rejected ({len} bytes)")]
    InvalidHmacKey {
        /// Length of the decoded key.
        len: usize,
    },

    /// A key repository line does not consist of exactly two fields.
    #[error("key repository line {line_number} must contain two fields separated by a space: {line:?}")]
    MalformedRepositoryLine {
        /// 1-based line number in the source.
        line_number: usize,
        /// The offending line.
        line: String,
    },

    /// The key repository source could not be read.
    #[error("failed to read key repository")]
    RepositoryIo(#[from] std::io::Error),

    /// The `client` parameter names a client absent from the repository.
    #[error("unknown client: {0}")]
    UnknownClient(String),

    /// The literal `&signature=` boundary is absent from the signed URL, or
    /// further parameters follow the signature.
    #[error("signature must be the final &signature= parameter of URL: {0}")]
    MalformedSignedUrl(String),

    /// The attached signature differs from the recomputed one.
    #[error("signature does not match: {provided}")]
    SignatureMismatch {
        /// The signature attached to the URL.
        provided: String,
    },
}
