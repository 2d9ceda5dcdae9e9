//! Redirect resolution outcome.

use serde::{Deserialize, Serialize};

use crate::error_handling::ErrorType;

/// Result of resolving one URL.
///
/// Produced once per [`optimize`](crate::RedirectResolver::optimize) call and
/// never mutated afterwards. `final_url` is always usable: on failure it is
/// the last URL that was reached (or the normalized input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectOutcome {
    /// The URL exactly as the caller supplied it
    pub original_url: String,
    /// The normalized URL resolution ended on
    pub final_url: String,
    /// Number of redirects followed
    pub hop_count: usize,
    /// Wall-clock time spent resolving
    pub elapsed_ms: u64,
    /// Status of the last response received, if any probe completed
    pub status_code: Option<u16>,
    /// Transport failure that ended resolution
    pub error: Option<String>,
    /// Category of `error`
    pub error_type: Option<ErrorType>,
    /// The terminal page looked like a consent interstitial
    pub cookie_wall_suspected: bool,
    /// Explanatory note (set when the hop limit stopped resolution)
    pub note: Option<String>,
    /// Every URL probed, in order
    pub redirect_chain: Vec<String>,
}

impl RedirectOutcome {
    /// True when the final URL differs from what the caller passed in.
    ///
    /// Normalization alone (added scheme, stripped tracking parameters)
    /// counts as a change.
    pub fn was_redirected(&self) -> bool {
        self.original_url != self.final_url
    }

    /// True when no error occurred and the last probe returned 200, or no
    /// probe was made at all.
    pub fn is_successful(&self) -> bool {
        self.error.is_none() && matches!(self.status_code, None | Some(200))
    }
}
