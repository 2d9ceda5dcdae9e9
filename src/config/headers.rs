//! Probe request headers.
//!
//! Realistic browser headers sent with every probe so that origins serve the
//! same redirect they would serve a browser.

/// Accept header sent with every probe.
pub const HEADER_ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Accept-Language header sent with every probe.
pub const HEADER_ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Builds the header list for a probe request.
///
/// The user agent comes first so that logging it alongside failures is cheap.
///
/// # Arguments
///
/// * `user_agent` - The User-Agent value to send
///
/// # Returns
///
/// A vector of lowercase (name, value) tuples.
pub fn probe_headers(user_agent: &str) -> Vec<(String, String)> {
    vec![
        ("user-agent".to_string(), user_agent.to_string()),
        ("accept".to_string(), HEADER_ACCEPT_VALUE.to_string()),
        (
            "accept-language".to_string(),
            HEADER_ACCEPT_LANGUAGE_VALUE.to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_headers_include_user_agent() {
        let headers = probe_headers("urlsift_test/1.0");
        assert_eq!(
            headers[0],
            ("user-agent".to_string(), "urlsift_test/1.0".to_string())
        );
        assert!(headers.iter().any(|(name, _)| name == "accept"));
        assert!(headers.iter().any(|(name, _)| name == "accept-language"));
    }

    #[test]
    fn test_probe_headers_are_lowercase() {
        for (name, _) in probe_headers("ua") {
            assert_eq!(name, name.to_lowercase());
        }
    }
}
