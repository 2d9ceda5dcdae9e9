//! Image manipulation descriptor types.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Mechanism by which an image URL can be rewritten.
///
/// Exactly one strategy applies to a URL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ManipulationStrategy {
    /// The URL cannot be rewritten
    #[default]
    None,
    /// Width/height/quality live in generic query parameters
    QueryParameters,
    /// Dimensions are encoded in a path segment or filename
    PathSegments,
    /// A known CDN's own URL syntax
    CdnSpecific,
    /// Caller-defined convention; never produced by the analyzer
    Custom,
}

/// CDN or platform identity recognized by the registry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CdnType {
    /// No known CDN
    #[default]
    None,
    /// Cloudinary
    Cloudinary,
    /// imgix
    Imgix,
    /// Unsplash (imgix-backed)
    Unsplash,
    /// Sanity asset CDN
    Sanity,
    /// Contentful Images API
    Contentful,
    /// Shopify CDN
    Shopify,
    /// Fastly Image Optimizer
    Fastly,
    /// Akamai Image Manager
    Akamai,
    /// WordPress uploads and Jetpack Photon
    Wordpress,
    /// Cloudflare Images
    Cloudflare,
    /// Twitter/X media
    Twitter,
    /// Facebook CDN
    Facebook,
    /// Instagram CDN
    Instagram,
    /// Medium image proxy
    Medium,
    /// YouTube thumbnails
    Youtube,
    /// Amazon media
    Amazon,
    /// Squarespace CDN
    Squarespace,
    /// Wix static media
    Wix,
}

/// What can be changed on an image URL, and how.
///
/// Serialized in camelCase with `strategy` and `cdnType` as variant names.
/// Invariants:
/// - `strategy == None` implies every `can_adjust_*` flag is false
/// - any other strategy implies at least one flag is true
/// - parameter names are only set for `QueryParameters`, and only for
///   adjustable axes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManipulationCapabilities {
    /// Rewriting mechanism
    pub strategy: ManipulationStrategy,
    /// Detected CDN, if any
    pub cdn_type: Option<CdnType>,
    /// Width can be requested
    pub can_adjust_width: bool,
    /// Height can be requested
    pub can_adjust_height: bool,
    /// Quality can be requested
    pub can_adjust_quality: bool,
    /// Query key carrying the width
    pub width_param_name: Option<String>,
    /// Query key carrying the height
    pub height_param_name: Option<String>,
    /// Query key carrying the quality
    pub quality_param_name: Option<String>,
    /// Largest width the strategy accepts
    pub max_width: Option<u32>,
    /// Largest height the strategy accepts
    pub max_height: Option<u32>,
    /// Smallest quality the strategy accepts
    pub min_quality: Option<u32>,
    /// Largest quality the strategy accepts
    pub max_quality: Option<u32>,
}

impl ManipulationCapabilities {
    /// A descriptor for URLs that cannot be rewritten.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when the descriptor satisfies the flag/strategy invariants.
    pub fn is_consistent(&self) -> bool {
        let any_axis = self.can_adjust_width || self.can_adjust_height || self.can_adjust_quality;
        let names_ok = if self.strategy == ManipulationStrategy::QueryParameters {
            (self.width_param_name.is_some() == self.can_adjust_width)
                && (self.height_param_name.is_some() == self.can_adjust_height)
                && (self.quality_param_name.is_some() == self.can_adjust_quality)
        } else {
            self.width_param_name.is_none()
                && self.height_param_name.is_none()
                && self.quality_param_name.is_none()
        };
        let strategy_ok = match self.strategy {
            ManipulationStrategy::None => !any_axis,
            _ => any_axis,
        };
        names_ok && strategy_ok
    }
}

/// Dimensions requested from the rewriter.
///
/// Unset fields are left as they are in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Target width in pixels
    pub width: Option<u32>,
    /// Target height in pixels
    pub height: Option<u32>,
    /// Target quality (usually 1-100)
    pub quality: Option<u32>,
}

impl ImageRequest {
    /// True when no dimension is requested.
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.quality.is_none()
    }
}
