//! Server-side authentication tests.

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use urlsign_auth::{AuthError, KeyRepository, authenticate, generate_key_with, sign_url};

    use urlsign_auth::generate_key_with_len;
    use urlsign_core::UrlSignConfig;

    use crate::{load_repository, provision, write_repository};

    #[test]
    fn test_should_accept_url_signed_by_provisioned_client() {
        let clients = provision(&["acme", "globex"]);
        let repo = load_repository(&write_repository(&clients));

        for client in &clients {
            let url = format!(
                "https://api.example.com/v1/geocode/json?address=1600+Amphitheatre&client={}",
                client.id
            );
            let signed = sign_url(&url, &client.key).unwrap();
            let request = authenticate(&repo, &signed).unwrap();

            assert_eq!(request.client_id(), client.id);
            assert_eq!(request.params().first("address"), Some("1600 Amphitheatre"));
            assert_eq!(request.url().path(), "/v1/geocode/json");
        }
    }

    #[test]
    fn test_should_reject_url_signed_with_another_clients_key() {
        let clients = provision(&["acme", "globex"]);
        let repo = load_repository(&write_repository(&clients));

        // globex signs a URL that claims to come from acme.
        let signed = sign_url("https://api.example.com/v1/items?client=acme", &clients[1].key)
            .unwrap();

        assert!(matches!(
            authenticate(&repo, &signed),
            Err(AuthError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_should_reject_unprovisioned_client() {
        let clients = provision(&["acme"]);
        let repo = load_repository(&write_repository(&clients));
        let signed = sign_url("https://api.example.com/v1/items?client=initech", &clients[0].key)
            .unwrap();

        assert!(matches!(
            authenticate(&repo, &signed),
            Err(AuthError::UnknownClient(ref id)) if id == "initech"
        ));
    }

    #[test]
    fn test_should_reject_every_single_character_signature_change() {
        let key = generate_key_with(&mut StdRng::seed_from_u64(42), 20).unwrap();
        let repo: KeyRepository = [("acme".to_owned(), key.clone())].into_iter().collect();
        let signed = sign_url("https://api.example.com/v1/items?id=9&client=acme", &key).unwrap();
        assert!(authenticate(&repo, &signed).is_ok());

        let boundary = "&signature=";
        let start = signed.rfind(boundary).unwrap() + boundary.len();
        let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

        for i in start..signed.len() {
            let original = &signed[i..=i];
            for replacement in alphabet.chars().map(String::from).filter(|c| c != original) {
                let tampered = format!("{}{replacement}{}", &signed[..i], &signed[i + 1..]);
                assert!(
                    authenticate(&repo, &tampered).is_err(),
                    "accepted tampered URL {tampered}"
                );
            }
        }
    }

    #[test]
    fn test_should_reject_tampered_path() {
        let clients = provision(&["acme"]);
        let repo = load_repository(&write_repository(&clients));
        let signed = sign_url("https://api.example.com/v1/items?client=acme", &clients[0].key)
            .unwrap();
        let tampered = signed.replace("/v1/items", "/v1/admin");

        assert!(matches!(
            authenticate(&repo, &tampered),
            Err(AuthError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_should_reject_invalid_registered_key() {
        let signed = sign_url(
            "http://maps.googleapis.com/maps/api/geocode/json?address=New+York&sensor=false&client=clientID",
            "vNIXE0xscrmjlyV-12Nj_BvUPaw=",
        )
        .unwrap();
        let repo: KeyRepository = [("clientID".to_owned(), "invalidBased64Key".to_owned())]
            .into_iter()
            .collect();

        let err = authenticate(&repo, &signed).unwrap_err();
        assert!(matches!(err, AuthError::InvalidKeyEncoding(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_should_authenticate_with_environment_configuration() -> anyhow::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let path = file.path().display().to_string();
        let config = UrlSignConfig::from_lookup(|name| match name {
            "KEY_REPOSITORY" => Some(path.clone()),
            "KEY_LENGTH" => Some("32".to_owned()),
            _ => None,
        })?;

        let key = generate_key_with_len(config.key_length)?;
        std::fs::write(&config.key_repository, format!("acme {key}\n"))?;

        let repo = KeyRepository::from_path(&config.key_repository)?;
        let signed = sign_url("https://api.example.com/v1/items?client=acme", &key)?;
        assert_eq!(authenticate(&repo, &signed)?.client_id(), "acme");
        Ok(())
    }

    #[test]
    fn test_should_authenticate_query_with_non_utf8_escape() {
        let clients = provision(&["c"]);
        let repo = load_repository(&write_repository(&clients));
        let signed = sign_url("http://h/p?data=%ff&client=c", &clients[0].key).unwrap();

        let request = authenticate(&repo, &signed).unwrap();
        assert_eq!(request.client_id(), "c");
        assert_eq!(request.params().first("data"), Some("\u{fffd}"));
    }

    #[test]
    fn test_should_authenticate_reencoded_path() {
        let clients = provision(&["c"]);
        let repo = load_repository(&write_repository(&clients));
        let signed = sign_url("http://h/New%20York/x?client=c", &clients[0].key).unwrap();
        assert!(authenticate(&repo, &signed).is_ok());

        // The path is signed decoded, so re-encoding it keeps the signature valid.
        let reencoded = signed.replace("/New%20York/", "/New%20Yor%6B/");
        assert!(authenticate(&repo, &reencoded).is_ok());

        let changed = signed.replace("/New%20York/", "/New%20Jersey/");
        assert!(matches!(
            authenticate(&repo, &changed),
            Err(AuthError::SignatureMismatch { .. })
        ));
    }
}
