//! URL signing with HMAC-SHA1.
//!
//! The signature covers the URL's path and raw query:
//!
//! ```text
//! StringToSign = PercentDecode(Path) + "?" + RawQuery
//! Signature    = UrlSafeBase64(HMAC-SHA1(UrlSafeBase64Decode(Key), StringToSign))
//! ```
//!
//! The path is percent-decoded, so any encoding of the same path signs
//! alike. The query is used byte-for-byte as it appears in the URL. Parsing and
//! re-serializing it could reorder or re-escape parameters, and the verifier
//! would then sign different bytes than the client did.
//!
//! A URL to be signed must carry a `client` parameter and must not carry a
//! `signature` parameter yet. The signature is appended as the final
//! parameter, `&signature=<sig>`.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::debug;

use crate::codec::{decode_url_safe_base64, encode_url_safe_base64};
use crate::error::AuthError;
use crate::query::QueryParams;
use crate::url::ParsedUrl;

type HmacSha1 = Hmac<Sha1>;

/// Query parameter naming the client whose key signed the URL.
pub const CLIENT_PARAM: &str = "client";

/// Query parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Compute the signature of `url` under the URL-safe base64 `key`.
///
/// # Errors
///
/// Returns [`AuthError::MalformedQuery`] if the query cannot be parsed,
/// [`AuthError::MissingClientParameter`] if there is no `client` parameter,
/// [`AuthError::UnexpectedSignatureParameter`] if a `signature` parameter is
/// already present, or [`AuthError::InvalidKeyEncoding`] if `key` is not
/// URL-safe base64.
pub fn create_signature(url: &ParsedUrl, key: &str) -> Result<String, AuthError> {
    let params = QueryParams::parse(url.raw_query())?;
    if !params.contains(CLIENT_PARAM) {
        return Err(AuthError::MissingClientParameter(url.to_string()));
    }
    if params.contains(SIGNATURE_PARAM) {
        return Err(AuthError::UnexpectedSignatureParameter(url.to_string()));
    }

    let string_to_sign = url.string_to_sign();

    debug!(
        string_to_sign = %String::from_utf8_lossy(&string_to_sign),
        "Built string to sign"
    );

    let secret = decode_url_safe_base64(key).map_err(AuthError::InvalidKeyEncoding)?;
    compute_signature(&secret, &string_to_sign)
}

/// Sign `raw_url` with `key` and return it with `&signature=<sig>` appended.
///
/// The result is rebuilt as `scheme://host` + path + `?` + raw query, so any
/// fragment or user information in the input is dropped.
///
/// # Errors
///
/// Returns [`AuthError::MalformedUrl`] if `raw_url` cannot be parsed, and any
/// error from [`create_signature`].
///
/// # Examples
///
/// ```
/// use urlsign_auth::signer::sign_url;
///
/// let signed = sign_url(
///     "http://maps.googleapis.com/maps/api/geocode/json?address=New+York&sensor=false&client=clientID",
///     "vNIXE0xscrmjlyV-12Nj_BvUPaw=",
/// )
/// .unwrap();
/// assert!(signed.ends_with("&signature=KrU1TzVQM7Ur0i8i7K3huiw3MsA="));
/// ```
pub fn sign_url(raw_url: &str, key: &str) -> Result<String, AuthError> {
    let url = ParsedUrl::parse(raw_url)?;
    let signature = create_signature(&url, key)?;

    debug!(host = %url.host(), path = %url.path(), "Signed URL");

    Ok(format!(
        "{}://{}{}?{}&{SIGNATURE_PARAM}={signature}",
        url.scheme(),
        url.host(),
        url.path(),
        url.raw_query(),
    ))
}

/// Compute `UrlSafeBase64(HMAC-SHA1(secret, string_to_sign))`.
pub(crate) fn compute_signature(
    secret: &[u8],
    string_to_sign: &[u8],
) -> Result<String, AuthError> {
    let mut mac = <HmacSha1 as KeyInit>::new_from_slice(secret)
        .map_err(|_| AuthError::InvalidHmacKey { len: secret.len() })?;
    mac.update(string_to_sign);
    Ok(encode_url_safe_base64(mac.finalize().into_bytes()))
}
