//! Image URL rewriting.

use log::debug;

use super::patterns::{find_path_dimensions, rewrite_segment, PathForm};
use super::registry::{builder_for, CdnBuilder};
use super::types::{ImageRequest, ManipulationCapabilities, ManipulationStrategy};
use super::url_parts::{set_query_params, UrlParts};
use crate::config::{DEFAULT_MAX_QUALITY, DEFAULT_MIN_QUALITY};

/// Transformation keys recognized in an existing Cloudinary segment.
const TRANSFORM_KEYS: &[&str] = &[
    "c", "w", "h", "q", "g", "f", "ar", "dpr", "e", "fl", "b", "r", "a", "o", "x", "y", "z", "t",
    "l", "bo", "co",
];

/// Clamps without panicking when `max < min`.
fn clamp(value: u32, min: u32, max: Option<u32>) -> u32 {
    let value = value.max(min);
    match max {
        Some(max) => value.min(max),
        None => value,
    }
}

/// Requested values that the descriptor supports, already clamped.
#[derive(Debug, Clone, Copy, Default)]
struct Clamped {
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u32>,
}

impl Clamped {
    fn new(caps: &ManipulationCapabilities, request: &ImageRequest) -> Self {
        Self {
            width: request
                .width
                .filter(|_| caps.can_adjust_width)
                .map(|w| clamp(w, 1, caps.max_width)),
            height: request
                .height
                .filter(|_| caps.can_adjust_height)
                .map(|h| clamp(h, 1, caps.max_height)),
            quality: request.quality.filter(|_| caps.can_adjust_quality).map(|q| {
                clamp(
                    q,
                    caps.min_quality.unwrap_or(DEFAULT_MIN_QUALITY),
                    Some(caps.max_quality.unwrap_or(DEFAULT_MAX_QUALITY)),
                )
            }),
        }
    }

    fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.quality.is_none()
    }
}

/// Builds a URL for the requested dimensions.
///
/// Values are clamped to the descriptor's bounds, axes the descriptor does not
/// support are ignored, and everything else in the URL is left byte-for-byte
/// intact. When nothing applies, `base_url` comes back unchanged.
///
/// # Examples
///
/// ```
/// use urlsift::{analyze_image_url, generate_url, ImageRequest};
///
/// let base = "https://example.com/img.jpg?w=400&fmt=webp";
/// let caps = analyze_image_url(base);
/// let request = ImageRequest { width: Some(800), ..Default::default() };
/// assert_eq!(
///     generate_url(&caps, base, &request),
///     "https://example.com/img.jpg?w=800&fmt=webp"
/// );
/// ```
pub fn generate_url(
    capabilities: &ManipulationCapabilities,
    base_url: &str,
    request: &ImageRequest,
) -> String {
    if request.is_empty() {
        return base_url.to_string();
    }
    let values = Clamped::new(capabilities, request);
    if values.is_empty() {
        return base_url.to_string();
    }
    let Some(parts) = UrlParts::split(base_url) else {
        debug!("Cannot rewrite unparseable image URL: {base_url}");
        return base_url.to_string();
    };

    let rewritten = match capabilities.strategy {
        ManipulationStrategy::None | ManipulationStrategy::Custom => None,
        ManipulationStrategy::QueryParameters => with_query_params(&parts, capabilities, values),
        ManipulationStrategy::PathSegments => with_path_dimensions(&parts, values),
        ManipulationStrategy::CdnSpecific => capabilities
            .cdn_type
            .and_then(builder_for)
            .and_then(|builder| with_cdn_builder(&parts, builder, values)),
    };

    rewritten.unwrap_or_else(|| base_url.to_string())
}

fn with_query_params(
    parts: &UrlParts<'_>,
    caps: &ManipulationCapabilities,
    values: Clamped,
) -> Option<String> {
    let params: Vec<(&str, String)> = [
        (caps.width_param_name.as_deref(), values.width),
        (caps.height_param_name.as_deref(), values.height),
        (caps.quality_param_name.as_deref(), values.quality),
    ]
    .into_iter()
    .filter_map(|(name, value)| Some((name?, value?.to_string())))
    .collect();

    if params.is_empty() {
        return None;
    }
    Some(parts.with_query(&set_query_params(parts.query, &params)))
}

fn with_path_dimensions(parts: &UrlParts<'_>, values: Clamped) -> Option<String> {
    let mut segments = parts.segments();
    let found = find_path_dimensions(&segments)?;

    let width = values.width.filter(|_| found.form.has_width());
    let height = values.height.filter(|_| found.form.has_height());
    if width.is_none() && height.is_none() {
        return None;
    }

    let replaced = rewrite_segment(segments[found.segment_index], found.form, width, height)?;
    segments[found.segment_index] = replaced.as_str();
    Some(parts.with_path(&segments.join("/")))
}

fn with_cdn_builder(parts: &UrlParts<'_>, builder: CdnBuilder, values: Clamped) -> Option<String> {
    match builder {
        CdnBuilder::TransformSegment { anchor } => with_transform_segment(parts, anchor, values),
        CdnBuilder::Query {
            width,
            height,
            quality,
            auto_format,
        } => {
            let mut params: Vec<(&str, String)> = [
                (width, values.width),
                (height, values.height),
                (quality, values.quality),
            ]
            .into_iter()
            .filter_map(|(name, value)| Some((name?, value?.to_string())))
            .collect();
            if params.is_empty() {
                return None;
            }
            if let Some((key, flag)) = auto_format {
                let present = parts.query_pairs().iter().any(|(k, _)| k == key);
                if !present {
                    params.push((key, flag.to_string()));
                }
            }
            Some(parts.with_query(&set_query_params(parts.query, &params)))
        }
        CdnBuilder::DimensionSuffix { width, height } => {
            with_dimension_suffix(parts, width, height, values)
        }
    }
}

fn is_transform_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.split(',').all(|component| {
            component
                .split_once('_')
                .is_some_and(|(key, _)| TRANSFORM_KEYS.contains(&key))
        })
}

fn component_key(component: &str) -> Option<&str> {
    component.split_once('_').map(|(key, _)| key)
}

/// Sets `key_value` on a transformation, replacing the first component with
/// that key and dropping any later duplicates.
fn set_component(components: &mut Vec<String>, key: &str, value: &str, front: bool) {
    let token = format!("{key}_{value}");
    match components.iter().position(|c| component_key(c) == Some(key)) {
        Some(pos) => {
            components[pos] = token;
            let mut seen = 0;
            components.retain(|c| {
                if component_key(c) != Some(key) {
                    return true;
                }
                seen += 1;
                seen == 1
            });
        }
        None if front => components.insert(0, token),
        None => components.push(token),
    }
}

fn with_transform_segment(parts: &UrlParts<'_>, anchor: &str, values: Clamped) -> Option<String> {
    let mut segments: Vec<&str> = parts.segments();
    let anchor_index = segments.iter().position(|s| *s == anchor)?;
    let slot = anchor_index + 1;
    let last = segments.len() - 1;
    let existing = (slot < last && is_transform_segment(segments[slot])).then(|| segments[slot]);

    // Unrelated effects (gravity, format, ...) in an existing segment survive
    let mut components: Vec<String> = existing
        .map(|seg| seg.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(w) = values.width {
        set_component(&mut components, "w", &w.to_string(), false);
    }
    if let Some(h) = values.height {
        set_component(&mut components, "h", &h.to_string(), false);
    }
    if let Some(q) = values.quality {
        set_component(&mut components, "q", &q.to_string(), false);
    }
    if values.width.is_some() || values.height.is_some() {
        let has = |key: &str| components.iter().any(|c| component_key(c) == Some(key));
        let crop = if has("w") && has("h") { "fill" } else { "scale" };
        set_component(&mut components, "c", crop, true);
    }
    if components.is_empty() {
        return None;
    }
    let transform = components.join(",");

    if existing.is_some() {
        segments[slot] = transform.as_str();
    } else {
        segments.insert(slot, transform.as_str());
    }
    Some(parts.with_path(&segments.join("/")))
}

fn with_dimension_suffix(
    parts: &UrlParts<'_>,
    width_param: &str,
    height_param: &str,
    values: Clamped,
) -> Option<String> {
    if let (Some(w), Some(h)) = (values.width, values.height) {
        let mut segments = parts.segments();
        let last = segments.len() - 1;
        let replaced =
            rewrite_segment(segments[last], PathForm::FilenameSuffix, Some(w), Some(h));
        if let Some(replaced) = &replaced {
            segments[last] = replaced.as_str();
            return Some(parts.with_path(&segments.join("/")));
        }
    }

    let params: Vec<(&str, String)> = [(width_param, values.width), (height_param, values.height)]
        .into_iter()
        .filter_map(|(name, value)| Some((name, value?.to_string())))
        .collect();
    if params.is_empty() {
        return None;
    }
    Some(parts.with_query(&set_query_params(parts.query, &params)))
}
