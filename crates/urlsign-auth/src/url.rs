//! Parsed request URLs that keep their raw bytes.
//!
//! [`ParsedUrl`] never re-serializes anything: the path and query it hands out
//! are slices of the original input. The string to sign uses the
//! percent-decoded path and the query exactly as it appears on the wire.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use http::Uri;
use percent_encoding::percent_decode_str;

use crate::error::AuthError;

/// A URL decomposed into scheme, host, raw path, and raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    uri: Uri,
}

impl ParsedUrl {
    /// Parse an absolute (`scheme://host/path?query`) or origin-form
    /// (`/path?query`) URL.
    ///
    /// The grammar is RFC 3986 as enforced by [`http::Uri`], which is stricter
    /// than browsers: unescaped `"`, `{`, `}`, spaces and other characters
    /// outside the URI alphabet are rejected, as is any URL of 64 KiB or more.
    /// Clients must percent-encode such characters before signing.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedUrl`] if the input is not a valid URI.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let uri = Uri::from_str(raw).map_err(|source| AuthError::MalformedUrl {
            url: raw.to_owned(),
            source,
        })?;
        Ok(Self { uri })
    }

    /// The scheme, or `""` for origin-form URLs.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.uri.scheme_str().unwrap_or("")
    }

    /// Host and optional port, without any user information.
    #[must_use]
    pub fn host(&self) -> &str {
        self.uri.authority().map_or("", |authority| {
            let raw = authority.as_str();
            raw.rsplit_once('@').map_or(raw, |(_, host)| host)
        })
    }

    /// The path exactly as written. A URL whose query directly follows the
    /// host (`http://host?q`) has an empty path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path_and_query().map_or("", |pq| {
            let raw = pq.as_str();
            raw.split_once('?').map_or(raw, |(path, _)| path)
        })
    }

    /// The path with percent escapes decoded. `+` is left alone, and a `%`
    /// not followed by two hex digits is kept literally.
    #[must_use]
    pub fn decoded_path(&self) -> Cow<'_, [u8]> {
        percent_decode_str(self.path()).into()
    }

    /// The query exactly as written, without the leading `?`.
    #[must_use]
    pub fn raw_query(&self) -> &str {
        self.uri.query().unwrap_or("")
    }

    /// The bytes a signature covers: `decoded_path + "?" + raw_query`.
    ///
    /// The path is decoded so that `/New%20York` and any other encoding of the
    /// same path sign alike; the query is signed byte-for-byte.
    #[must_use]
    pub fn string_to_sign(&self) -> Vec<u8> {
        let path = self.decoded_path();
        let query = self.raw_query().as_bytes();
        let mut out = Vec::with_capacity(path.len() + 1 + query.len());
        out.extend_from_slice(&path);
        out.push(b'?');
        out.extend_from_slice(query);
        out
    }

    /// The underlying [`Uri`].
    #[must_use]
    pub fn as_uri(&self) -> &Uri {
        &self.uri
    }
}

impl FromStr for ParsedUrl {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}
