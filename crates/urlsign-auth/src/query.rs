//! Multi-valued query parameter mapping.
//!
//! A query string is decoded the way HTML forms encode it: pairs separated by
//! `&`, name and value separated by the first `=`, `+` meaning a space and
//! `%XX` meaning a byte. Values for a repeated name keep their order.
//!
//! A stray `%` or a `;` separator makes the whole query malformed instead of
//! being silently patched up, because the parameters drive which key is used
//! for verification. Escapes that decode to bytes outside UTF-8 are accepted
//! and replaced with U+FFFD; the signature covers the raw query, so decoding
//! never changes what is signed.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

use crate::error::AuthError;

/// Decoded query parameters: name to ordered values, duplicates preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedQuery`] on an invalid percent escape or a
    /// `;` separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlsign_auth::query::QueryParams;
    ///
    /// let params = QueryParams::parse("address=New+York&a=1&a=2").unwrap();
    /// assert_eq!(params.first("address"), Some("New York"));
    /// assert_eq!(params.get("a").unwrap(), ["1", "2"]);
    /// ```
    pub fn parse(query: &str) -> Result<Self, AuthError> {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for segment in query.split('&').filter(|s| !s.is_empty()) {
            if segment.contains(';') {
                return Err(malformed(query, "invalid semicolon separator"));
            }
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            let name = form_decode(name).map_err(|reason| malformed(query, &reason))?;
            let value = form_decode(value).map_err(|reason| malformed(query, &reason))?;
            params.entry(name).or_default().push(value);
        }

        Ok(Self { params })
    }

    /// All values for `name`, in order of appearance.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).map(Vec::as_slice)
    }

    /// The first value for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Number of values present for `name` (zero when absent).
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.get(name).map_or(0, <[String]>::len)
    }

    /// Whether `name` appears at all, even with an empty value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over names and their values, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

fn malformed(query: &str, reason: &str) -> AuthError {
    AuthError::MalformedQuery {
        query: query.to_owned(),
        reason: reason.to_owned(),
    }
}

/// Decode one form-encoded component.
fn form_decode(component: &str) -> Result<String, String> {
    let bytes = component.as_bytes();
    for (i, _) in component.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            let end = (i + 3).min(component.len());
            return Err(format!(
                "invalid URL escape {:?}",
                String::from_utf8_lossy(&bytes[i..end])
            ));
        }
    }

    let spaced = component.replace('+', " ");
    Ok(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}
