//! Subcommand implementations.
//!
//! Each command returns the text to print so it can be exercised without a
//! process boundary.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use tracing::info;
use urlsign_auth::{KeyRepository, SignedRequest, authenticate, check_signed_url};

/// Mint a `length`-byte key.
pub fn keygen(length: usize) -> Result<String> {
    let key = urlsign_auth::generate_key_with_len(length)
        .with_context(|| format!("cannot generate a {length}-byte key"))?;
    info!(length, "generated key");
    Ok(key)
}

/// Sign `url` with `key`.
pub fn sign(url: &str, key: &str) -> Result<String> {
    urlsign_auth::sign_url(url, key).with_context(|| format!("cannot sign {url}"))
}

/// Check the structure of a signed URL.
pub fn check(url: &str, json: bool) -> Result<String> {
    let request = check_signed_url(url).with_context(|| format!("malformed signed URL {url}"))?;
    Ok(render(&request, json))
}

/// Authenticate a signed URL against the repository at `repository`.
pub fn verify(url: &str, repository: &Path, json: bool) -> Result<String> {
    let keys = KeyRepository::from_path(repository)
        .with_context(|| format!("cannot load key repository {}", repository.display()))?;

    info!(
        repository = %repository.display(),
        clients = keys.len(),
        "loaded key repository"
    );

    let request = authenticate(&keys, url).context("signed URL rejected")?;

    info!(client_id = %request.client_id(), "signed URL accepted");

    Ok(render(&request, json))
}

fn render(request: &SignedRequest, json: bool) -> String {
    if json {
        request_json(request).to_string()
    } else {
        request.client_id().to_owned()
    }
}

fn request_json(request: &SignedRequest) -> Value {
    let params: Map<String, Value> = request
        .params()
        .iter()
        .map(|(name, values)| (name.to_owned(), json!(values)))
        .collect();

    json!({
        "client": request.client_id(),
        "path": request.url().path(),
        "params": params,
    })
}
