//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually, one HEAD probe per hop, so
//! that every hop is counted and bounded.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::config::{probe_headers, ResolverConfig, MAX_REDIRECTS_NOTE};
use crate::error_handling::{InitializationError, ProbeError};
use crate::fetch::location::resolve_location;
use crate::fetch::outcome::RedirectOutcome;
use crate::fetch::probe::{NetworkProbe, ProbeMethod, ProbeRequest, ProbeResponse, ReqwestProbe};
use crate::normalize::normalize;

/// Returns true when a page body looks like a cookie consent interstitial.
///
/// Crude keyword heuristic: "cookie" together with "consent" or "accept",
/// case-insensitive. False positives are expected.
pub fn looks_like_cookie_wall(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("cookie") && (lower.contains("consent") || lower.contains("accept"))
}

/// Resolves URLs to their canonical, reachable destination.
///
/// Holds no per-call state; a single resolver can serve any number of
/// concurrent `optimize` calls.
pub struct RedirectResolver {
    probe: Arc<dyn NetworkProbe>,
    config: ResolverConfig,
}

impl RedirectResolver {
    /// Creates a resolver over an arbitrary probe.
    pub fn new(probe: Arc<dyn NetworkProbe>, config: ResolverConfig) -> Self {
        Self { probe, config }
    }

    /// Creates a resolver backed by [`ReqwestProbe`].
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the HTTP client cannot be built.
    pub fn with_reqwest(config: ResolverConfig) -> Result<Self, InitializationError> {
        let probe = ReqwestProbe::from_config(&config)?;
        Ok(Self::new(Arc::new(probe), config))
    }

    /// Returns the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a URL, following redirects up to the configured hop limit.
    ///
    /// The URL is normalized first, and so is every redirect target. Each hop
    /// is one HEAD probe bounded by the configured timeout. Resolution stops
    /// at the first non-redirect response, at the first transport failure, or
    /// when the hop limit is reached.
    ///
    /// # Arguments
    ///
    /// * `url` - The raw URL string
    ///
    /// # Returns
    ///
    /// A `RedirectOutcome`. This never fails: transport errors are recorded
    /// in `error` and `final_url` is the last URL reached.
    ///
    /// A malformed `Location` ends the chain at the URL that sent it. When the
    /// hop limit is reached, `final_url` is the last redirect target, which
    /// has not itself been probed; `note` is set in that case.
    pub async fn optimize(&self, url: &str) -> RedirectOutcome {
        let start = Instant::now();
        let mut current = normalize(url);

        let mut outcome = RedirectOutcome {
            original_url: url.to_string(),
            final_url: current.clone(),
            hop_count: 0,
            elapsed_ms: 0,
            status_code: None,
            error: None,
            error_type: None,
            cookie_wall_suspected: false,
            note: None,
            redirect_chain: Vec::new(),
        };

        if !self.config.follow_redirects {
            outcome.elapsed_ms = start.elapsed().as_millis() as u64;
            return outcome;
        }

        loop {
            if outcome.hop_count >= self.config.max_redirects {
                if outcome.hop_count > 0 {
                    info!(
                        "Stopped after {} redirects for {}: {}",
                        outcome.hop_count, url, MAX_REDIRECTS_NOTE
                    );
                    outcome.note = Some(MAX_REDIRECTS_NOTE.to_string());
                }
                break;
            }

            outcome.redirect_chain.push(current.clone());
            let response = match self.send_probe(ProbeMethod::Head, &current).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Probe failed for {}: {}", current, e);
                    outcome.error_type = Some(e.error_type());
                    outcome.error = Some(e.to_string());
                    break;
                }
            };
            outcome.status_code = Some(response.status);

            if response.is_redirect() {
                let Some(location) = response.location() else {
                    // Redirect status but no Location header - unusual, treat as terminal
                    warn!(
                        "Redirect status {} for {} but no Location header",
                        response.status, current
                    );
                    break;
                };
                let Some(next) = resolve_location(&current, location) else {
                    warn!(
                        "Unresolvable Location {:?} from {} (status {})",
                        location, current, response.status
                    );
                    break;
                };
                outcome.hop_count += 1;
                debug!(
                    "Hop {}: {} -> {} ({})",
                    outcome.hop_count, current, next, response.status
                );
                current = normalize(&next);
                continue;
            }

            if response.status == 200 && response.is_html() && self.config.detect_cookie_walls {
                outcome.cookie_wall_suspected = self.detect_cookie_wall(&current, &response).await;
            }
            break;
        }

        outcome.final_url = current;
        outcome.elapsed_ms = start.elapsed().as_millis() as u64;
        outcome
    }

    /// Resolves many URLs with at most `concurrency` resolutions in flight.
    ///
    /// Redirect chains are followed sequentially per URL; independent URLs run
    /// concurrently. Outcomes are returned in input order.
    pub async fn optimize_all(&self, urls: Vec<String>, concurrency: usize) -> Vec<RedirectOutcome> {
        let limit = concurrency.max(1);
        stream::iter(urls)
            .map(|url| async move { self.optimize(&url).await })
            .buffered(limit)
            .collect()
            .await
    }

    /// Sends one probe, bounded by the configured timeout even if the probe
    /// implementation ignores it.
    async fn send_probe(&self, method: ProbeMethod, url: &str) -> Result<ProbeResponse, ProbeError> {
        let request = ProbeRequest {
            method,
            url: url.to_string(),
            headers: probe_headers(self.config.effective_user_agent()),
            timeout: self.config.timeout,
        };
        match tokio::time::timeout(self.config.timeout, self.probe.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.config.timeout)),
        }
    }

    /// Checks the terminal page for a cookie wall.
    ///
    /// Uses the HEAD response body when the probe supplied one, otherwise
    /// issues a single bounded GET. A failed GET just means "not suspected".
    async fn detect_cookie_wall(&self, url: &str, head: &ProbeResponse) -> bool {
        if let Some(body) = head.body.as_deref() {
            return looks_like_cookie_wall(body);
        }
        match self.send_probe(ProbeMethod::Get, url).await {
            Ok(response) => response
                .body
                .as_deref()
                .map(looks_like_cookie_wall)
                .unwrap_or(false),
            Err(e) => {
                debug!("Cookie wall check skipped for {}: {}", url, e);
                false
            }
        }
    }
}
