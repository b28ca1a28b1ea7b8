//! End-to-end tests for urlsign.
//!
//! These tests drive the public API of `urlsign-auth` the way a deployment
//! does: mint keys, write them to a repository file, sign URLs on the client
//! side, and authenticate them on the server side.
//!
//! Run them with:
//! ```text
//! cargo test -p urlsign-integration
//! ```

use std::io::Write;
use std::sync::Once;

use tempfile::NamedTempFile;
use urlsign_auth::{KeyRepository, generate_key};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A client provisioned with a freshly minted key.
#[derive(Debug, Clone)]
pub struct Client {
    /// Client ID placed in the `client` parameter.
    pub id: String,
    /// URL-safe base64 secret key.
    pub key: String,
}

/// Mint keys for `ids`.
///
/// # Panics
///
/// Panics if key generation fails.
#[must_use]
pub fn provision(ids: &[&str]) -> Vec<Client> {
    init_tracing();
    tracing::debug!(clients = ids.len(), "provisioning clients");

    ids.iter()
        .map(|id| Client {
            id: (*id).to_owned(),
            key: generate_key().expect("key generation should succeed"),
        })
        .collect()
}

/// Write `clients` to a repository file in the line-oriented format.
///
/// # Panics
///
/// Panics if the temporary file cannot be written.
#[must_use]
pub fn write_repository(clients: &[Client]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "# provisioned by urlsign-integration").expect("write header");
    for client in clients {
        writeln!(file, "{} {}", client.id, client.key).expect("write entry");
    }
    file.flush().expect("flush repository");
    file
}

/// Load the repository that [`write_repository`] produced.
///
/// # Panics
///
/// Panics if the repository cannot be loaded.
#[must_use]
pub fn load_repository(file: &NamedTempFile) -> KeyRepository {
    KeyRepository::from_path(file.path()).expect("repository should load")
}

mod test_authenticate;
mod test_concurrency;
mod test_repository;
mod test_sign;
