//! HMAC-SHA1 signed-URL authentication.
//!
//! This crate implements shared-secret URL signing in the style of the Maps
//! API for Business: a client holding a secret key signs the path and query of
//! each request URL and appends the result as a final `signature` parameter.
//! The server looks up the key of the `client` named in the URL, recomputes the
//! signature, and accepts the request only if both match.
//!
//! # Overview
//!
//! ```text
//! StringToSign = PercentDecode(Path) + "?" + RawQuery
//! Signature    = UrlSafeBase64(HMAC-SHA1(Key, StringToSign))
//! SignedUrl    = Scheme + "://" + Host + Path + "?" + RawQuery + "&signature=" + Signature
//! ```
//!
//! Keys and signatures travel as URL-safe base64 (standard base64 with `-` for
//! `+` and `_` for `/`, padding kept).
//!
//! # Usage
//!
//! ```rust
//! use urlsign_auth::{KeyRepository, authenticate, generate_key, sign_url};
//!
//! // Mint a key for a client and register it.
//! let key = generate_key().unwrap();
//! let repo: KeyRepository = [("acme".to_owned(), key.clone())].into_iter().collect();
//!
//! // Client side: sign an outgoing URL.
//! let signed = sign_url("https://api.example.com/v1/geocode?q=Paris&client=acme", &key).unwrap();
//!
//! // Server side: verify it.
//! let request = authenticate(&repo, &signed).unwrap();
//! assert_eq!(request.client_id(), "acme");
//! ```
//!
//! # Modules
//!
//! - [`authenticator`] - Verification of incoming signed URLs
//! - [`codec`] - URL-safe base64 encoding and decoding
//! - [`error`] - Authentication error types
//! - [`keygen`] - Shared-secret key generation
//! - [`query`] - Multi-valued query parameter mapping
//! - [`repository`] - In-memory client key repository
//! - [`signer`] - Signature computation and URL signing
//! - [`url`] - Parsed URLs that keep their raw path and query
//! - [`validator`] - Structural checks on signed URLs

pub mod authenticator;
pub mod codec;
pub mod error;
pub mod keygen;
pub mod query;
pub mod repository;
pub mod signer;
pub mod url;
pub mod validator;

pub use authenticator::authenticate;
pub use codec::{DecodeError, decode_url_safe_base64, encode_url_safe_base64};
pub use error::AuthError;
pub use keygen::{DEFAULT_KEY_LEN, generate_key, generate_key_with, generate_key_with_len};
pub use query::QueryParams;
pub use repository::KeyRepository;
pub use signer::{create_signature, sign_url};
pub use url::ParsedUrl;
pub use validator::{SignedRequest, check_signed_url};
