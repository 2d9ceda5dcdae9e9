//! Network probe abstraction.
//!
//! The resolver only talks to the network through [`NetworkProbe`], so tests
//! can script responses and callers can plug in their own transport.
//! [`ReqwestProbe`] is the production implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, LOCATION};

use crate::config::{ResolverConfig, MAX_BODY_SNIPPET_BYTES};
use crate::error_handling::{categorize_reqwest_error, InitializationError, ProbeError};
use crate::initialization::init_probe_client;

/// HTTP method used by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    /// Headers only; used for every redirect hop
    Head,
    /// Headers plus a bounded body; used for the cookie-wall check
    Get,
}

impl ProbeMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            ProbeMethod::Head => reqwest::Method::HEAD,
            ProbeMethod::Get => reqwest::Method::GET,
        }
    }
}

/// A single request handed to a [`NetworkProbe`].
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// HTTP method
    pub method: ProbeMethod,
    /// Absolute URL to request
    pub url: String,
    /// Request headers as lowercase (name, value) pairs
    pub headers: Vec<(String, String)>,
    /// Upper bound on the whole exchange
    pub timeout: Duration,
}

/// Response returned by a [`NetworkProbe`].
#[derive(Debug, Clone, Default)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body text, if the probe read one (never for HEAD)
    pub body: Option<String>,
}

impl ProbeResponse {
    /// Creates a response with a status and no headers or body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Adds a header, ignoring names or values that are not valid HTTP.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns true for 3xx statuses.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Returns the `Location` header when present and non-empty.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the `Content-Type` header value.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Returns true when the content type is HTML or XHTML.
    pub fn is_html(&self) -> bool {
        self.content_type()
            .map(|ct| {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml")
            })
            .unwrap_or(false)
    }
}

/// Sends probe requests on behalf of the redirect resolver.
///
/// Implementations must not follow redirects themselves; the resolver needs
/// every 3xx response to count hops.
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    /// Sends one request and returns its response, or a transport failure.
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError>;
}

/// [`NetworkProbe`] backed by a `reqwest::Client` with redirects disabled.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: Arc<reqwest::Client>,
}

impl ReqwestProbe {
    /// Wraps an existing client.
    ///
    /// The client must be built with `redirect::Policy::none()`, otherwise
    /// redirect chains collapse into a single hop.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }

    /// Builds a probe with a fresh client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, InitializationError> {
        Ok(Self::new(init_probe_client(config)?))
    }
}

#[async_trait]
impl NetworkProbe for ReqwestProbe {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError> {
        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => builder = builder.header(name, value),
                _ => debug!("Skipping invalid probe header {name}"),
            }
        }

        let mut resp = builder
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e, request.timeout))?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();

        let body = if request.method == ProbeMethod::Get {
            let mut bytes: Vec<u8> = Vec::new();
            while bytes.len() < MAX_BODY_SNIPPET_BYTES {
                match resp.chunk().await {
                    Ok(Some(chunk)) => bytes.extend_from_slice(&chunk),
                    Ok(None) => break,
                    Err(e) => return Err(categorize_reqwest_error(&e, request.timeout)),
                }
            }
            bytes.truncate(MAX_BODY_SNIPPET_BYTES);
            Some(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            None
        };

        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_redirect_range() {
        assert!(ProbeResponse::new(301).is_redirect());
        assert!(ProbeResponse::new(300).is_redirect());
        assert!(ProbeResponse::new(399).is_redirect());
        assert!(!ProbeResponse::new(200).is_redirect());
        assert!(!ProbeResponse::new(400).is_redirect());
    }

    #[test]
    fn test_location_ignores_empty_values() {
        let resp = ProbeResponse::new(302).with_header("location", "   ");
        assert_eq!(resp.location(), None);

        let resp = ProbeResponse::new(302).with_header("Location", "/next");
        assert_eq!(resp.location(), Some("/next"));
    }

    #[test]
    fn test_is_html() {
        let resp = ProbeResponse::new(200).with_header("content-type", "text/html; charset=utf-8");
        assert!(resp.is_html());

        let resp = ProbeResponse::new(200).with_header("content-type", "image/png");
        assert!(!resp.is_html());

        assert!(!ProbeResponse::new(200).is_html());
    }

    #[test]
    fn test_with_header_skips_invalid_values() {
        let resp = ProbeResponse::new(200).with_header("bad header", "x");
        assert!(resp.headers.is_empty());
    }
}
