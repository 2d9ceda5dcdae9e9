//! Configuration constants.
//!
//! This module defines the defaults used by the resolver and the command-line
//! front end: redirect limits, timeouts, batch sizing and body limits.

use std::time::Duration;

// Redirect handling
/// Default maximum number of redirect hops to follow.
/// Prevents infinite redirect loops and excessive request chains.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default per-probe timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// Default number of URLs resolved concurrently by `optimize_all`.
///
/// Kept small: each URL holds a connection open for every hop of its chain.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Maximum number of body bytes read when checking a page for a cookie wall (64KB).
/// Consent banners are rendered near the top of the document.
pub const MAX_BODY_SNIPPET_BYTES: usize = 64 * 1024;

/// Default User-Agent string for probe requests.
///
/// Mimics a modern Chrome browser on Windows; some origins answer HEAD
/// requests from unknown agents with 403 instead of the redirect.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Note attached to an outcome when the hop limit stops resolution.
pub const MAX_REDIRECTS_NOTE: &str = "Maximum redirect count reached";

// Image manipulation bounds
/// Lower bound applied to every clamped quality value when a descriptor does not declare one.
pub const DEFAULT_MIN_QUALITY: u32 = 1;
/// Upper bound applied to every clamped quality value when a descriptor does not declare one.
pub const DEFAULT_MAX_QUALITY: u32 = 100;
