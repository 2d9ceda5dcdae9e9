//! Image URL capability analysis.

use log::debug;

use super::patterns::find_path_dimensions;
use super::registry::{capabilities_for, detect_cdn};
use super::types::{CdnType, ManipulationCapabilities, ManipulationStrategy};
use super::url_parts::UrlParts;

const WIDTH_ALIASES: &[&str] = &["w", "width", "wid", "maxwidth", "mw"];
const HEIGHT_ALIASES: &[&str] = &["h", "height", "hei", "maxheight", "mh"];
const QUALITY_ALIASES: &[&str] = &["q", "quality", "qlt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
    Quality,
}

fn axis_for_key(key: &str) -> Option<Axis> {
    let key = key.to_ascii_lowercase();
    if WIDTH_ALIASES.contains(&key.as_str()) {
        Some(Axis::Width)
    } else if HEIGHT_ALIASES.contains(&key.as_str()) {
        Some(Axis::Height)
    } else if QUALITY_ALIASES.contains(&key.as_str()) {
        Some(Axis::Quality)
    } else {
        None
    }
}

fn positive_int(value: &str) -> bool {
    value.parse::<u32>().is_ok_and(|n| n > 0)
}

/// Determines how an image URL can be rewritten.
///
/// The first applicable strategy wins:
/// 1. a recognized CDN with its own URL syntax (`cdnSpecific`)
/// 2. generic width/height/quality query parameters (`queryParameters`)
/// 3. dimensions encoded in a path segment or filename (`pathSegments`)
/// 4. otherwise `none`
///
/// Never fails: anything that cannot be parsed is simply "not a match".
///
/// # Examples
///
/// ```
/// use urlsift::{analyze_image_url, ManipulationStrategy};
///
/// let caps = analyze_image_url("https://example.com/img.jpg?w=400&q=80");
/// assert_eq!(caps.strategy, ManipulationStrategy::QueryParameters);
/// assert_eq!(caps.width_param_name.as_deref(), Some("w"));
/// assert!(!caps.can_adjust_height);
/// ```
pub fn analyze_image_url(url: &str) -> ManipulationCapabilities {
    let Some(parts) = UrlParts::split(url.trim()) else {
        debug!("Cannot analyze unparseable image URL: {url}");
        return ManipulationCapabilities::none();
    };

    let cdn = detect_cdn(url);
    if cdn != CdnType::None {
        let caps = capabilities_for(cdn);
        if caps.strategy == ManipulationStrategy::CdnSpecific {
            return caps;
        }
    }
    let cdn_type = (cdn != CdnType::None).then_some(cdn);

    if let Some(caps) = from_query(&parts, cdn_type) {
        return caps;
    }
    if let Some(caps) = from_path(&parts, cdn_type) {
        return caps;
    }

    ManipulationCapabilities {
        cdn_type,
        ..ManipulationCapabilities::none()
    }
}

fn from_query(parts: &UrlParts<'_>, cdn_type: Option<CdnType>) -> Option<ManipulationCapabilities> {
    let mut caps = ManipulationCapabilities {
        strategy: ManipulationStrategy::QueryParameters,
        cdn_type,
        ..ManipulationCapabilities::none()
    };

    for (key, value) in parts.query_pairs() {
        let Some(axis) = axis_for_key(&key) else {
            continue;
        };
        if !positive_int(value) {
            continue;
        }
        let slot = match axis {
            Axis::Width => &mut caps.width_param_name,
            Axis::Height => &mut caps.height_param_name,
            Axis::Quality => &mut caps.quality_param_name,
        };
        if slot.is_none() {
            *slot = Some(key);
        }
    }

    caps.can_adjust_width = caps.width_param_name.is_some();
    caps.can_adjust_height = caps.height_param_name.is_some();
    caps.can_adjust_quality = caps.quality_param_name.is_some();
    if !(caps.can_adjust_width || caps.can_adjust_height || caps.can_adjust_quality) {
        return None;
    }
    caps.min_quality = caps.can_adjust_quality.then_some(crate::config::DEFAULT_MIN_QUALITY);
    caps.max_quality = caps.can_adjust_quality.then_some(crate::config::DEFAULT_MAX_QUALITY);
    Some(caps)
}

fn from_path(parts: &UrlParts<'_>, cdn_type: Option<CdnType>) -> Option<ManipulationCapabilities> {
    let found = find_path_dimensions(&parts.segments())?;
    debug!(
        "Path dimensions {:?} at segment {} (width {:?}, height {:?})",
        found.form, found.segment_index, found.width, found.height
    );
    Some(ManipulationCapabilities {
        strategy: ManipulationStrategy::PathSegments,
        cdn_type,
        can_adjust_width: found.form.has_width(),
        can_adjust_height: found.form.has_height(),
        ..ManipulationCapabilities::none()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameters_with_two_axes() {
        let caps = analyze_image_url("https://example.com/img.jpg?width=800&quality=75");
        assert_eq!(caps.strategy, ManipulationStrategy::QueryParameters);
        assert!(caps.can_adjust_width);
        assert!(!caps.can_adjust_height);
        assert!(caps.can_adjust_quality);
        assert_eq!(caps.width_param_name.as_deref(), Some("width"));
        assert_eq!(caps.quality_param_name.as_deref(), Some("quality"));
        assert_eq!(caps.height_param_name, None);
        assert_eq!(caps.cdn_type, None);
        assert!(caps.is_consistent());
    }

    #[test]
    fn test_query_keys_are_case_insensitive_and_keep_their_spelling() {
        let caps = analyze_image_url("https://example.com/img.jpg?MaxWidth=300&MH=200");
        assert_eq!(caps.width_param_name.as_deref(), Some("MaxWidth"));
        assert_eq!(caps.height_param_name.as_deref(), Some("MH"));
    }

    #[test]
    fn test_query_value_must_be_positive_integer() {
        let caps = analyze_image_url("https://example.com/img.jpg?w=auto&h=0&q=-5");
        assert_eq!(caps.strategy, ManipulationStrategy::None);

        let caps = analyze_image_url("https://example.com/img.jpg?w=auto&width=640");
        assert_eq!(caps.width_param_name.as_deref(), Some("width"));
    }

    #[test]
    fn test_first_alias_per_axis_wins() {
        let caps = analyze_image_url("https://example.com/img.jpg?mw=100&w=200");
        assert_eq!(caps.width_param_name.as_deref(), Some("mw"));
    }

    #[test]
    fn test_cdn_beats_generic_query_parameters() {
        let caps = analyze_image_url("https://acme.imgix.net/photo.jpg?w=400&h=300");
        assert_eq!(caps.strategy, ManipulationStrategy::CdnSpecific);
        assert_eq!(caps.cdn_type, Some(CdnType::Imgix));
        assert_eq!(caps.width_param_name, None);
    }

    #[test]
    fn test_path_segment_forms() {
        let caps = analyze_image_url("https://example.com/img/800x600/photo.jpg");
        assert_eq!(caps.strategy, ManipulationStrategy::PathSegments);
        assert!(caps.can_adjust_width && caps.can_adjust_height);
        assert!(!caps.can_adjust_quality);

        let caps = analyze_image_url("https://example.com/resize/w640/photo.jpg");
        assert!(caps.can_adjust_width);
        assert!(!caps.can_adjust_height);

        let caps = analyze_image_url("https://example.com/media/photo-300x200.png");
        assert_eq!(caps.strategy, ManipulationStrategy::PathSegments);
        assert!(caps.is_consistent());
    }

    #[test]
    fn test_query_beats_path() {
        let caps = analyze_image_url("https://example.com/800x600/a.jpg?q=50");
        assert_eq!(caps.strategy, ManipulationStrategy::QueryParameters);
    }

    #[test]
    fn test_platform_without_convention_reports_cdn() {
        let caps = analyze_image_url("https://pbs.twimg.com/media/abc.jpg");
        assert_eq!(caps.strategy, ManipulationStrategy::None);
        assert_eq!(caps.cdn_type, Some(CdnType::Twitter));
        assert!(caps.is_consistent());
    }

    #[test]
    fn test_plain_and_unparseable_urls() {
        assert_eq!(
            analyze_image_url("https://example.com/images/photo.jpg"),
            ManipulationCapabilities::none()
        );
        assert_eq!(analyze_image_url("not a url"), ManipulationCapabilities::none());
        assert_eq!(analyze_image_url(""), ManipulationCapabilities::none());
    }
}
