//! Error categorization.
//!
//! Maps `reqwest` failures onto [`ProbeError`] so that the resolver never
//! depends on the HTTP client's error type.

use std::time::Duration;

use super::types::ProbeError;

/// Categorizes a `reqwest::Error` into a [`ProbeError`].
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
/// * `timeout` - The timeout the request was sent with (reported on timeouts)
///
/// # Returns
///
/// The matching `ProbeError` variant carrying the error's message.
pub fn categorize_reqwest_error(error: &reqwest::Error, timeout: Duration) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout(timeout)
    } else if error.is_connect() {
        ProbeError::Connect(error.to_string())
    } else if error.is_builder() {
        ProbeError::InvalidUrl(error.to_string())
    } else if error.is_body() || error.is_decode() {
        ProbeError::Body(error.to_string())
    } else {
        ProbeError::Request(error.to_string())
    }
}
