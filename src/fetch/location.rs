//! `Location` header resolution.

use url::Url;

use crate::normalize::has_scheme;

/// Resolves a redirect `Location` value against the URL that returned it.
///
/// - absolute (`scheme://...`): used as-is
/// - protocol-relative (`//host/path`): inherits the scheme of `current`
/// - root-relative (`/path`): inherits scheme, host and port of `current`
/// - anything else: resolved against the directory of `current`'s path
///
/// # Arguments
///
/// * `current` - The absolute URL that was probed
/// * `location` - The raw `Location` header value
///
/// # Returns
///
/// The absolute target URL, or `None` if `location` is empty, `current`
/// cannot serve as a base, or the target does not parse as a URL.
pub fn resolve_location(current: &str, location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    if has_scheme(location) {
        return parses(location.to_string());
    }

    let base = Url::parse(current).ok()?;
    if let Some(rest) = location.strip_prefix("//") {
        return parses(format!("{}://{}", base.scheme(), rest));
    }

    base.join(location).ok().map(String::from)
}

fn parses(target: String) -> Option<String> {
    Url::parse(&target).is_ok().then_some(target)
}
