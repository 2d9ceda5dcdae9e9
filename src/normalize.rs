//! URL normalization.
//!
//! Adds a default scheme, drops the fragment and strips tracking query
//! parameters. Normalization never fails: input that cannot be parsed is
//! returned with its scheme prefix and nothing else touched.

use log::debug;
use url::form_urlencoded;

/// Query keys removed by [`normalize`] regardless of case.
const TRACKING_PARAMS: &[&str] = &[
    // UTM family
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    // Facebook click ids
    "fbclid",
    "fb_action_ids",
    "fb_action_types",
    "fb_ref",
    "fb_source",
    // Google click ids
    "gclid",
    "gclsrc",
    "dclid",
    "gbraid",
    "wbraid",
    // Other ad platforms
    "msclkid",
    "yclid",
    "igshid",
    "twclid",
    // Referral, source and origin aliases
    "ref",
    "ref_src",
    "ref_url",
    "referrer",
    "source",
    "origin",
    // Email platforms
    "mc_cid",
    "mc_eid",
    "mkt_tok",
    "_hsenc",
    "_hsmi",
    "vero_id",
    "vero_conv",
    "ck_subscriber_id",
    "oly_anon_id",
    "oly_enc_id",
];

/// Key prefixes that mark a query parameter as tracking.
const TRACKING_PREFIXES: &[&str] = &["utm_", "fb_", "ga_", "_"];

/// Returns true when a query key is a known tracking parameter.
///
/// # Examples
///
/// ```
/// use urlsift::is_tracking_param;
///
/// assert!(is_tracking_param("utm_source"));
/// assert!(is_tracking_param("FBCLID"));
/// assert!(is_tracking_param("_ga"));
/// assert!(!is_tracking_param("id"));
/// ```
pub fn is_tracking_param(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    TRACKING_PARAMS.contains(&lower.as_str())
        || TRACKING_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
}

/// Returns true when the input starts with `scheme://`.
pub(crate) fn has_scheme(input: &str) -> bool {
    let Some(idx) = input.find("://") else {
        return false;
    };
    let scheme = &input[..idx];
    scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Normalizes a URL into its canonical, tracking-free form.
///
/// - Prefixes `https://` when the input has no scheme separator
/// - Removes the fragment
/// - Removes tracking query parameters (see [`is_tracking_param`])
///
/// Parameters that survive keep their original encoding and order. When no
/// parameter is removed the URL is returned as given, minus its fragment.
/// The function is idempotent.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// The normalized URL, or the scheme-prefixed input if it cannot be parsed.
///
/// # Examples
///
/// ```
/// use urlsift::normalize;
///
/// assert_eq!(
///     normalize("https://example.com?utm_source=a&utm_medium=b&fbclid=c"),
///     "https://example.com"
/// );
/// assert_eq!(
///     normalize("https://example.com?id=5&utm_source=a"),
///     "https://example.com?id=5"
/// );
/// assert_eq!(normalize("example.com/page#top"), "https://example.com/page");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    // Add https:// prefix if the input has no scheme
    let with_scheme = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if let Err(e) = url::Url::parse(&with_scheme) {
        debug!("Leaving unparseable URL untouched ({e}): {with_scheme}");
        return with_scheme;
    }

    let without_fragment = match with_scheme.find('#') {
        Some(idx) => &with_scheme[..idx],
        None => with_scheme.as_str(),
    };

    let Some((base, query)) = without_fragment.split_once('?') else {
        return without_fragment.to_string();
    };

    let mut removed = 0usize;
    let kept: Vec<&str> = query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| {
            let key = form_urlencoded::parse(segment.as_bytes())
                .next()
                .map(|(key, _)| key.into_owned())
                .unwrap_or_default();
            if is_tracking_param(&key) {
                removed += 1;
                false
            } else {
                true
            }
        })
        .collect();

    if removed == 0 {
        without_fragment.to_string()
    } else if kept.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", kept.join("&"))
    }
}
