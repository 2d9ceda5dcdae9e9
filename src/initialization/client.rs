//! HTTP client initialization.

use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for redirect probing.
///
/// Creates a `reqwest::Client` with redirects disabled so we can manually
/// track and count every hop, configured with:
/// - Timeout from the resolver configuration
/// - User-Agent from the resolver configuration (or the default)
///
/// # Arguments
///
/// * `config` - Resolver configuration containing user-agent and timeout settings
///
/// # Returns
///
/// A configured HTTP client with redirects disabled.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client(
    config: &ResolverConfig,
) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.timeout)
        .user_agent(config.effective_user_agent().to_string())
        .build()?;
    Ok(Arc::new(client))
}
