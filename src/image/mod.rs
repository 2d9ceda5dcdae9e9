//! Image URL analysis and rewriting.
//!
//! This module provides:
//! - Capability descriptors ([`ManipulationCapabilities`])
//! - The static CDN registry
//! - Analysis of an image URL into a descriptor
//! - Generation of resized/re-encoded variants from a descriptor

mod analyzer;
mod patterns;
mod registry;
mod rewriter;
mod types;
mod url_parts;

pub use analyzer::analyze_image_url;
pub use registry::{capabilities_for, cdn_patterns, detect_cdn, CdnPattern};
pub use rewriter::generate_url;
pub use types::{CdnType, ImageRequest, ManipulationCapabilities, ManipulationStrategy};
