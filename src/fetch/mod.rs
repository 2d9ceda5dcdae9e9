//! Redirect resolution.
//!
//! This module provides:
//! - The [`NetworkProbe`] seam and its `reqwest` implementation
//! - `Location` header resolution
//! - The bounded redirect loop ([`RedirectResolver`])

mod location;
mod outcome;
mod probe;
mod redirects;

pub use location::resolve_location;
pub use outcome::RedirectOutcome;
pub use probe::{NetworkProbe, ProbeMethod, ProbeRequest, ProbeResponse, ReqwestProbe};
pub use redirects::{looks_like_cookie_wall, RedirectResolver};
