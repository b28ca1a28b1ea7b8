//! Key repository loading tests.

#[cfg(test)]
mod tests {
    use urlsign_auth::{AuthError, KeyRepository, decode_url_safe_base64};

    use crate::{load_repository, provision, write_repository};

    #[test]
    fn test_should_round_trip_provisioned_clients_through_file() {
        let clients = provision(&["alpha", "beta", "gamma"]);
        let file = write_repository(&clients);
        let repo = load_repository(&file);

        assert_eq!(repo.len(), clients.len());
        for client in &clients {
            let key = repo.get(&client.id).unwrap();
            assert_eq!(key, client.key);
            assert!(decode_url_safe_base64(key).is_ok());
        }
    }

    #[test]
    fn test_should_load_published_sample() {
        let repo =
            KeyRepository::load("clientID vNIXE0xscrmjlyV-12Nj_BvUPaw=\nyiw something".as_bytes())
                .unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get("clientID"), Some("vNIXE0xscrmjlyV-12Nj_BvUPaw="));
        assert_eq!(repo.get("yiw"), Some("something"));
    }

    #[test]
    fn test_should_name_offending_line() {
        let err = KeyRepository::load("# ok\nalpha a2V5\nbeta\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AuthError::MalformedRepositoryLine { line_number: 3, .. }
        ));
        assert!(err.to_string().contains("beta"));
    }
}
