//! URL-safe base64 as used for keys and signatures.
//!
//! The encoding is standard base64 (padding included) with `+` replaced by
//! `-` and `/` replaced by `_`, so encoded values can be placed in a query
//! string without percent-encoding. Decoding reverses the substitution and
//! then decodes standard base64, which means input that still uses `+` or `/`
//! is accepted as well.

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

/// Standard alphabet with canonical padding. Non-zero trailing bits are
/// tolerated so that any key a peer accepts is accepted here too.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A string that is not URL-safe base64.
#[derive(Debug, thiserror::Error)]
#[error("invalid URL-safe base64 {input:?}")]
pub struct DecodeError {
    input: String,
    #[source]
    source: base64::DecodeError,
}

impl DecodeError {
    /// The input that failed to decode.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Encode bytes as URL-safe base64.
///
/// # Examples
///
/// ```
/// use urlsign_auth::codec::encode_url_safe_base64;
///
/// assert_eq!(encode_url_safe_base64([0xfb, 0xff]), "-_8=");
/// ```
#[must_use]
pub fn encode_url_safe_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD_LENIENT
        .encode(bytes)
        .replace('+', "-")
        .replace('/', "_")
}

/// Decode a URL-safe base64 string produced by [`encode_url_safe_base64`].
///
/// # Errors
///
/// Returns [`DecodeError`] when the string is not valid standard base64 once
/// `-` and `_` are mapped back to `+` and `/` (bad length, bad characters,
/// bad padding).
pub fn decode_url_safe_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let standard = encoded.replace('-', "+").replace('_', "/");
    STANDARD_LENIENT
        .decode(standard)
        .map_err(|source| DecodeError {
            input: encoded.to_owned(),
            source,
        })
}
