//! In-memory client key repository.
//!
//! The repository maps client IDs to URL-safe base64 secret keys. It is built
//! once from a line-oriented text source and read-only afterwards, so it can
//! be shared across threads without locking. Publishing a refreshed
//! repository is up to the owner (for example by swapping an `Arc`).
//!
//! Source format, one entry per line:
//!
//! ```text
//! # comment
//! <client-id> <key>
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Every other line must
//! be exactly two fields separated by a single space. A client ID that appears
//! twice keeps the key from its last line.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::AuthError;

/// Mapping from client ID to shared secret key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyRepository {
    keys: HashMap<String, String>,
}

impl KeyRepository {
    /// Load a repository from line-oriented text.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedRepositoryLine`] for a line that is not
    /// exactly two space-separated fields, or [`AuthError::RepositoryIo`] if
    /// the source cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlsign_auth::repository::KeyRepository;
    ///
    /// let source = "# clients\nclientID vNIXE0xscrmjlyV-12Nj_BvUPaw=\n\nyiw something";
    /// let repo = KeyRepository::load(source.as_bytes()).unwrap();
    /// assert_eq!(repo.len(), 2);
    /// assert_eq!(repo.get("yiw"), Some("something"));
    /// ```
    pub fn load(reader: impl BufRead) -> Result<Self, AuthError> {
        let mut keys = HashMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(' ').collect();
            let [client_id, key] = fields[..] else {
                return Err(AuthError::MalformedRepositoryLine {
                    line_number: index + 1,
                    line: line.clone(),
                });
            };
            keys.insert(client_id.to_owned(), key.to_owned());
        }

        debug!(clients = keys.len(), "Loaded key repository");

        Ok(Self { keys })
    }

    /// Load a repository from a file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RepositoryIo`] if the file cannot be opened or
    /// read, and any error from [`KeyRepository::load`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening key repository");
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// The key registered for `client_id`.
    #[must_use]
    pub fn get(&self, client_id: &str) -> Option<&str> {
        self.keys.get(client_id).map(String::as_str)
    }

    /// Whether `client_id` has a registered key.
    #[must_use]
    pub fn contains_client(&self, client_id: &str) -> bool {
        self.keys.contains_key(client_id)
    }

    /// Registered client IDs, in no particular order.
    pub fn client_ids(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no client is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(String, String)> for KeyRepository {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

// Keys are secrets; only client IDs are printed.
impl fmt::Debug for KeyRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRepository")
            .field("clients", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}
