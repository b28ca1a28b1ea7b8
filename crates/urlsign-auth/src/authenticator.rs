//! Signed-URL authentication.
//!
//! [`authenticate`] accepts a request URL only if its `signature` parameter is
//! the signature its `client` would have produced with the key registered in
//! the [`KeyRepository`]. The steps are:
//!
//! 1. Check structure with [`check_signed_url`]
//! 2. Resolve the client's key from the repository
//! 3. Recover the signed URL by cutting at the last `&signature=`, which must
//!    introduce the final parameter
//! 4. Recompute the signature of that prefix
//! 5. Compare the signatures in constant time
//!
//! The signature is always appended last when signing, so everything before
//! the last `&signature=` is exactly what was signed. There is no expiry or
//! nonce: a captured signed URL stays valid for as long as the key does.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::AuthError;
use crate::repository::KeyRepository;
use crate::signer::{SIGNATURE_PARAM, create_signature};
use crate::url::ParsedUrl;
use crate::validator::{SignedRequest, check_signed_url};

/// Authenticate `raw_url` against the keys in `repository`.
///
/// # Errors
///
/// Returns the [`check_signed_url`] error for a structurally invalid URL,
/// [`AuthError::UnknownClient`] if the client is not registered,
/// [`AuthError::MalformedSignedUrl`] if `&signature=` does not appear in the
/// URL or is followed by further parameters,
/// [`AuthError::SignatureMismatch`] if the signature is wrong, and any
/// [`create_signature`] error (such as an invalid registered key).
///
/// # Examples
///
/// ```
/// use urlsign_auth::authenticator::authenticate;
/// use urlsign_auth::repository::KeyRepository;
/// use urlsign_auth::signer::sign_url;
///
/// let key = "vNIXE0xscrmjlyV-12Nj_BvUPaw=";
/// let repo: KeyRepository = [("acme".to_owned(), key.to_owned())].into_iter().collect();
///
/// let signed = sign_url("https://api.example.com/v1/items?id=7&client=acme", key).unwrap();
/// let request = authenticate(&repo, &signed).unwrap();
/// assert_eq!(request.client_id(), "acme");
/// ```
pub fn authenticate(repository: &KeyRepository, raw_url: &str) -> Result<SignedRequest, AuthError> {
    let request = check_signed_url(raw_url)?;
    let client_id = request.client_id();

    debug!(client_id = %client_id, "Authenticating signed URL");

    let key = repository.get(client_id).ok_or_else(|| {
        debug!(client_id = %client_id, "Unknown client");
        AuthError::UnknownClient(client_id.to_owned())
    })?;

    let boundary = format!("&{SIGNATURE_PARAM}=");
    let signed_len = raw_url
        .rfind(&boundary)
        .ok_or_else(|| AuthError::MalformedSignedUrl(raw_url.to_owned()))?;

    // Anything after the signature would not be covered by it.
    if raw_url[signed_len + boundary.len()..].contains('&') {
        debug!(client_id = %client_id, "Parameters follow the signature");
        return Err(AuthError::MalformedSignedUrl(raw_url.to_owned()));
    }

    let unsigned = ParsedUrl::parse(&raw_url[..signed_len])?;
    let expected_signature = create_signature(&unsigned, key)?;
    let provided_signature = request.signature();

    if provided_signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        debug!(client_id = %client_id, "Signed URL verification succeeded");
        Ok(request)
    } else {
        debug!(
            client_id = %client_id,
            expected = %expected_signature,
            provided = %provided_signature,
            "Signature mismatch"
        );
        Err(AuthError::SignatureMismatch {
            provided: provided_signature.to_owned(),
        })
    }
}
