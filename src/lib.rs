//! urlsift library: URL canonicalization and image URL rewriting
//!
//! This library provides two independent services:
//! - **Redirect resolution**: normalize a URL (strip tracking parameters and
//!   fragments), follow its redirect chain with bounded HEAD probes, and report
//!   where it ends up.
//! - **Image URL manipulation**: work out how an image URL can be resized or
//!   re-encoded (CDN syntax, query parameters, or path segments) and generate
//!   variants for requested dimensions.
//!
//! # Example
//!
//! ```no_run
//! use urlsift::{RedirectResolver, ResolverConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = RedirectResolver::with_reqwest(ResolverConfig::default())?;
//! let outcome = resolver.optimize("example.com/?utm_source=mail").await;
//! println!("{} -> {} in {} hops", outcome.original_url, outcome.final_url, outcome.hop_count);
//! # Ok(())
//! # }
//! ```
//!
//! Image analysis needs no runtime:
//!
//! ```
//! use urlsift::{analyze_image_url, generate_url, ImageRequest};
//!
//! let url = "https://res.cloudinary.com/demo/image/upload/sample.jpg";
//! let caps = analyze_image_url(url);
//! let resized = generate_url(&caps, url, &ImageRequest { width: Some(400), ..Default::default() });
//! assert_eq!(resized, "https://res.cloudinary.com/demo/image/upload/c_scale,w_400/sample.jpg");
//! ```
//!
//! # Requirements
//!
//! Redirect resolution requires a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
mod fetch;
mod image;
pub mod initialization;
mod normalize;
pub mod run;

// Re-export public API
pub use config::{LogFormat, LogLevel, ResolverConfig};
pub use error_handling::{
    categorize_reqwest_error, ErrorType, InfoType, InitializationError, ProbeError,
    ProcessingStats,
};
pub use fetch::{
    looks_like_cookie_wall, resolve_location, NetworkProbe, ProbeMethod, ProbeRequest,
    ProbeResponse, RedirectOutcome, RedirectResolver, ReqwestProbe,
};
pub use image::{
    analyze_image_url, capabilities_for, cdn_patterns, detect_cdn, generate_url, CdnPattern,
    CdnType, ImageRequest, ManipulationCapabilities, ManipulationStrategy,
};
pub use normalize::{is_tracking_param, normalize};
pub use run::{run_resolve, ResolveReport};
