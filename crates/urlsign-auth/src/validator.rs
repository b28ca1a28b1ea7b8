//! Structural checks on signed URLs.
//!
//! Before any key is looked up, a signed URL must parse and carry exactly one
//! `client` and exactly one `signature` parameter. Nothing here touches key
//! material.

use tracing::debug;

use crate::error::AuthError;
use crate::query::QueryParams;
use crate::signer::{CLIENT_PARAM, SIGNATURE_PARAM};
use crate::url::ParsedUrl;

/// A signed URL that passed the structural checks.
///
/// Returned by [`check_signed_url`] and, once the signature is verified, by
/// [`authenticate`](crate::authenticator::authenticate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    url: ParsedUrl,
    params: QueryParams,
}

impl SignedRequest {
    /// The parsed URL.
    #[must_use]
    pub fn url(&self) -> &ParsedUrl {
        &self.url
    }

    /// The decoded query parameters.
    #[must_use]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// The single `client` value.
    #[must_use]
    pub fn client_id(&self) -> &str {
        self.params.first(CLIENT_PARAM).unwrap_or_default()
    }

    /// The single `signature` value.
    #[must_use]
    pub fn signature(&self) -> &str {
        self.params.first(SIGNATURE_PARAM).unwrap_or_default()
    }

    /// Split into the parsed URL and parameters.
    #[must_use]
    pub fn into_parts(self) -> (ParsedUrl, QueryParams) {
        (self.url, self.params)
    }
}

/// Check that `raw_url` is a structurally valid signed URL.
///
/// # Errors
///
/// Returns [`AuthError::MalformedUrl`] or [`AuthError::MalformedQuery`] when
/// the URL or its query cannot be parsed,
/// [`AuthError::MissingOrDuplicateClient`] unless there is exactly one
/// `client` value, and [`AuthError::MissingOrDuplicateSignature`] unless there
/// is exactly one `signature` value.
///
/// # Examples
///
/// ```
/// use urlsign_auth::validator::check_signed_url;
///
/// let request = check_signed_url("http://company.com/x?client=acme&signature=abc").unwrap();
/// assert_eq!(request.client_id(), "acme");
///
/// assert!(check_signed_url("http://company.com?signature=xxx").is_err());
/// ```
pub fn check_signed_url(raw_url: &str) -> Result<SignedRequest, AuthError> {
    let url = ParsedUrl::parse(raw_url)?;
    let params = QueryParams::parse(url.raw_query())?;

    let clients = params.count(CLIENT_PARAM);
    if clients != 1 {
        debug!(count = clients, "Signed URL has wrong number of client parameters");
        return Err(AuthError::MissingOrDuplicateClient { count: clients });
    }

    let signatures = params.count(SIGNATURE_PARAM);
    if signatures != 1 {
        debug!(count = signatures, "Signed URL has wrong number of signature parameters");
        return Err(AuthError::MissingOrDuplicateSignature { count: signatures });
    }

    Ok(SignedRequest { url, params })
}
