//! Shared-repository tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use urlsign_auth::{KeyRepository, authenticate, sign_url};

    use crate::{load_repository, provision, write_repository};

    #[test]
    fn test_should_authenticate_from_many_threads_without_locking() {
        let clients = provision(&["acme", "globex", "initech", "umbrella"]);
        let repo: Arc<KeyRepository> = Arc::new(load_repository(&write_repository(&clients)));

        let handles: Vec<_> = clients
            .iter()
            .cloned()
            .enumerate()
            .map(|(n, client)| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    for i in 0..50 {
                        let url = format!(
                            "https://api.example.com/v1/items?worker={n}&i={i}&client={}",
                            client.id
                        );
                        let signed = sign_url(&url, &client.key).unwrap();
                        let request = authenticate(&repo, &signed).unwrap();
                        assert_eq!(request.client_id(), client.id);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_should_publish_new_repository_by_swapping_snapshot() {
        let old_clients = provision(&["acme"]);
        let new_clients = provision(&["acme"]);
        let url = "https://api.example.com/v1/items?client=acme";

        let mut current = Arc::new(load_repository(&write_repository(&old_clients)));
        let signed_with_old = sign_url(url, &old_clients[0].key).unwrap();
        assert!(authenticate(&current, &signed_with_old).is_ok());

        let snapshot = Arc::clone(&current);
        current = Arc::new(load_repository(&write_repository(&new_clients)));

        // Readers holding the old snapshot keep their view.
        assert!(authenticate(&snapshot, &signed_with_old).is_ok());
        assert!(authenticate(&current, &signed_with_old).is_err());

        let signed_with_new = sign_url(url, &new_clients[0].key).unwrap();
        assert!(authenticate(&current, &signed_with_new).is_ok());
    }
}
