//! Shared-secret key generation.
//!
//! A key is nothing more than random bytes used as an HMAC key, handed around
//! as URL-safe base64. The randomness source is passed in so tests can use a
//! seeded generator; [`generate_key`] uses the operating system's source.

use rand::TryRngCore;
use rand::rngs::OsRng;
use tracing::debug;

use crate::codec::encode_url_safe_base64;
use crate::error::AuthError;

/// Number of random bytes in a key minted by [`generate_key`].
pub const DEFAULT_KEY_LEN: usize = 20;

/// Generate a fresh [`DEFAULT_KEY_LEN`]-byte key from the operating system's
/// randomness source.
///
/// # Errors
///
/// Returns [`AuthError::KeyGeneration`] if the operating system cannot supply
/// random bytes.
///
/// # Examples
///
/// ```
/// use urlsign_auth::codec::decode_url_safe_base64;
/// use urlsign_auth::keygen::{DEFAULT_KEY_LEN, generate_key};
///
/// let key = generate_key().unwrap();
/// assert_eq!(decode_url_safe_base64(&key).unwrap().len(), DEFAULT_KEY_LEN);
/// ```
pub fn generate_key() -> Result<String, AuthError> {
    generate_key_with_len(DEFAULT_KEY_LEN)
}

/// Generate a fresh `len`-byte key from the operating system's randomness
/// source.
///
/// # Errors
///
/// Returns [`AuthError::KeyGeneration`] if `len` is zero or the operating
/// system cannot supply random bytes.
pub fn generate_key_with_len(len: usize) -> Result<String, AuthError> {
    generate_key_with(&mut OsRng, len)
}

/// Generate a `len`-byte key drawing from `rng`.
///
/// # Errors
///
/// Returns [`AuthError::KeyGeneration`] if `len` is zero or `rng` fails.
pub fn generate_key_with<R>(rng: &mut R, len: usize) -> Result<String, AuthError>
where
    R: TryRngCore + ?Sized,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    if len == 0 {
        return Err(AuthError::KeyGeneration("key length must be non-zero".into()));
    }

    let mut secret = vec![0u8; len];
    rng.try_fill_bytes(&mut secret)
        .map_err(|e| AuthError::KeyGeneration(Box::new(e)))?;

    debug!(len, "Generated shared secret");

    Ok(encode_url_safe_base64(&secret))
}
