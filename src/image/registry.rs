//! Static CDN registry.
//!
//! Maps CDN identity patterns to their default capabilities and to the
//! builder that knows the CDN's URL syntax. The table is a `static` slice:
//! built at compile time, never mutated, shared freely across threads.

use super::types::{CdnType, ManipulationCapabilities, ManipulationStrategy};
use crate::config::{DEFAULT_MAX_QUALITY, DEFAULT_MIN_QUALITY};

/// How a CDN encodes width/height/quality in its URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CdnBuilder {
    /// Comma-joined transformation token inserted after an anchor path segment
    /// (`/upload/c_fill,w_800,h_600,q_80/...`).
    TransformSegment { anchor: &'static str },
    /// The CDN's own query parameter names, plus an optional fixed flag
    /// appended when absent.
    Query {
        width: Option<&'static str>,
        height: Option<&'static str>,
        quality: Option<&'static str>,
        auto_format: Option<(&'static str, &'static str)>,
    },
    /// `-WxH.ext` filename suffix, falling back to query parameters when the
    /// suffix is missing or only one dimension is requested.
    DimensionSuffix {
        width: &'static str,
        height: &'static str,
    },
}

/// Axes and bounds a CDN documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CdnLimits {
    pub width: bool,
    pub height: bool,
    pub quality: bool,
    pub max_width: u32,
    pub max_height: u32,
}

/// One registry row.
#[derive(Debug, Clone, Copy)]
pub struct CdnPattern {
    /// CDN identity
    pub cdn_type: CdnType,
    /// Lowercase substrings of the URL (host or path markers)
    pub matchers: &'static [&'static str],
    limits: Option<CdnLimits>,
    builder: Option<CdnBuilder>,
}

impl CdnPattern {
    /// True when `url_lower` (already lowercased) carries one of the markers.
    pub fn matches(&self, url_lower: &str) -> bool {
        self.matchers.iter().any(|m| url_lower.contains(m))
    }

    /// Default capabilities for this CDN.
    pub fn capabilities(&self) -> ManipulationCapabilities {
        let (Some(limits), Some(_)) = (self.limits, self.builder) else {
            return ManipulationCapabilities {
                cdn_type: Some(self.cdn_type),
                ..ManipulationCapabilities::none()
            };
        };
        ManipulationCapabilities {
            strategy: ManipulationStrategy::CdnSpecific,
            cdn_type: Some(self.cdn_type),
            can_adjust_width: limits.width,
            can_adjust_height: limits.height,
            can_adjust_quality: limits.quality,
            width_param_name: None,
            height_param_name: None,
            quality_param_name: None,
            max_width: limits.width.then_some(limits.max_width),
            max_height: limits.height.then_some(limits.max_height),
            min_quality: limits.quality.then_some(DEFAULT_MIN_QUALITY),
            max_quality: limits.quality.then_some(DEFAULT_MAX_QUALITY),
        }
    }
}

const fn limits(width: bool, height: bool, quality: bool, max: u32) -> Option<CdnLimits> {
    Some(CdnLimits {
        width,
        height,
        quality,
        max_width: max,
        max_height: max,
    })
}

const fn query(
    width: &'static str,
    height: Option<&'static str>,
    quality: Option<&'static str>,
    auto_format: Option<(&'static str, &'static str)>,
) -> Option<CdnBuilder> {
    Some(CdnBuilder::Query {
        width: Some(width),
        height,
        quality,
        auto_format,
    })
}

const AUTO_FORMAT: Option<(&str, &str)> = Some(("auto", "format"));

/// Registry rows in match priority order.
static CDN_PATTERNS: &[CdnPattern] = &[
    // Image CDNs
    CdnPattern {
        cdn_type: CdnType::Cloudinary,
        matchers: &["res.cloudinary.com", "cloudinary.com"],
        limits: limits(true, true, true, 5000),
        builder: Some(CdnBuilder::TransformSegment { anchor: "upload" }),
    },
    CdnPattern {
        cdn_type: CdnType::Imgix,
        matchers: &[".imgix.net"],
        limits: limits(true, true, true, 8192),
        builder: query("w", Some("h"), Some("q"), AUTO_FORMAT),
    },
    CdnPattern {
        cdn_type: CdnType::Unsplash,
        matchers: &["images.unsplash.com"],
        limits: limits(true, true, true, 8192),
        builder: query("w", Some("h"), Some("q"), AUTO_FORMAT),
    },
    CdnPattern {
        cdn_type: CdnType::Sanity,
        matchers: &["cdn.sanity.io"],
        limits: limits(true, true, true, 8192),
        builder: query("w", Some("h"), Some("q"), AUTO_FORMAT),
    },
    CdnPattern {
        cdn_type: CdnType::Contentful,
        matchers: &["images.ctfassets.net"],
        limits: limits(true, true, true, 4000),
        builder: query("w", Some("h"), Some("q"), None),
    },
    // E-commerce CDNs
    CdnPattern {
        cdn_type: CdnType::Shopify,
        matchers: &["cdn.shopify.com"],
        limits: limits(true, true, false, 5760),
        builder: query("width", Some("height"), None, None),
    },
    CdnPattern {
        cdn_type: CdnType::Fastly,
        matchers: &["fastly.net", "fastlylb"],
        limits: limits(true, true, true, 8192),
        builder: query("width", Some("height"), Some("quality"), None),
    },
    CdnPattern {
        cdn_type: CdnType::Akamai,
        matchers: &["akamaized.net", "akamaihd.net"],
        limits: limits(true, false, false, 5000),
        builder: query("imwidth", None, None, None),
    },
    CdnPattern {
        cdn_type: CdnType::Wordpress,
        matchers: &["wp-content/uploads", ".wp.com", "wordpress.com"],
        limits: limits(true, true, false, 2048),
        builder: Some(CdnBuilder::DimensionSuffix {
            width: "w",
            height: "h",
        }),
    },
    // Platforms without a documented resize convention
    CdnPattern {
        cdn_type: CdnType::Cloudflare,
        matchers: &["/cdn-cgi/image/", "imagedelivery.net"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Twitter,
        matchers: &["pbs.twimg.com"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Facebook,
        matchers: &["fbcdn.net"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Instagram,
        matchers: &["cdninstagram.com"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Medium,
        matchers: &["miro.medium.com"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Youtube,
        matchers: &["ytimg.com"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Amazon,
        matchers: &["media-amazon.com", "ssl-images-amazon.com"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Squarespace,
        matchers: &["squarespace-cdn.com"],
        limits: None,
        builder: None,
    },
    CdnPattern {
        cdn_type: CdnType::Wix,
        matchers: &["wixstatic.com"],
        limits: None,
        builder: None,
    },
];

/// Returns the registry rows in match priority order.
pub fn cdn_patterns() -> &'static [CdnPattern] {
    CDN_PATTERNS
}

fn find_pattern(cdn: CdnType) -> Option<&'static CdnPattern> {
    CDN_PATTERNS.iter().find(|p| p.cdn_type == cdn)
}

/// Identifies the CDN serving a URL.
///
/// Matching is case-insensitive over everything before the query string;
/// the first row with a matching marker wins.
///
/// # Examples
///
/// ```
/// use urlsift::{detect_cdn, CdnType};
///
/// assert_eq!(
///     detect_cdn("https://res.cloudinary.com/demo/image/upload/sample.jpg"),
///     CdnType::Cloudinary
/// );
/// assert_eq!(detect_cdn("https://example.com/a.jpg"), CdnType::None);
/// ```
pub fn detect_cdn(url: &str) -> CdnType {
    let without_query = url.split(['?', '#']).next().unwrap_or("");
    let lower = without_query.to_lowercase();
    CDN_PATTERNS
        .iter()
        .find(|p| p.matches(&lower))
        .map(|p| p.cdn_type)
        .unwrap_or(CdnType::None)
}

/// Returns the preconfigured capabilities for a CDN.
///
/// Identities without a documented convention (and `CdnType::None`) get a
/// `none`-strategy descriptor.
pub fn capabilities_for(cdn: CdnType) -> ManipulationCapabilities {
    match find_pattern(cdn) {
        Some(pattern) => pattern.capabilities(),
        None => ManipulationCapabilities::none(),
    }
}

/// Returns the URL builder for a CDN, if it has one.
pub(crate) fn builder_for(cdn: CdnType) -> Option<CdnBuilder> {
    find_pattern(cdn).and_then(|p| p.builder)
}
