//! Client-side signing tests.

#[cfg(test)]
mod tests {
    use urlsign_auth::{AuthError, ParsedUrl, create_signature, sign_url};

    const SAMPLE_URL: &str =
        "http://maps.googleapis.com/maps/api/geocode/json?address=New+York&sensor=false&client=clientID";
    const SAMPLE_KEY: &str = "vNIXE0xscrmjlyV-12Nj_BvUPaw=";

    #[test]
    fn test_should_match_published_signature() {
        let url = ParsedUrl::parse(SAMPLE_URL).unwrap();
        assert_eq!(
            create_signature(&url, SAMPLE_KEY).unwrap(),
            "KrU1TzVQM7Ur0i8i7K3huiw3MsA="
        );
        assert_eq!(
            sign_url(SAMPLE_URL, SAMPLE_KEY).unwrap(),
            "http://maps.googleapis.com/maps/api/geocode/json?address=New+York&sensor=false&client=clientID&signature=KrU1TzVQM7Ur0i8i7K3huiw3MsA="
        );
    }

    #[test]
    fn test_should_refuse_to_sign_twice() {
        let signed = sign_url(SAMPLE_URL, SAMPLE_KEY).unwrap();
        assert!(matches!(
            sign_url(&signed, SAMPLE_KEY),
            Err(AuthError::UnexpectedSignatureParameter(_))
        ));
    }

    #[test]
    fn test_should_refuse_url_without_client() {
        assert!(matches!(
            sign_url("http://maps.googleapis.com/maps/api/geocode/json?address=Paris", SAMPLE_KEY),
            Err(AuthError::MissingClientParameter(_))
        ));
    }

    #[test]
    fn test_should_preserve_port_in_signed_url() {
        let signed = sign_url("http://localhost:8080/v1/items?client=c", SAMPLE_KEY).unwrap();
        assert!(signed.starts_with("http://localhost:8080/v1/items?client=c&signature="));
    }
}
