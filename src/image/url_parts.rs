//! Textual URL splitting for image rewriting.
//!
//! Rewrites must leave every untouched byte of the URL as it was, so the
//! URL is validated with `url::Url` but edited as text.

use url::form_urlencoded;

use crate::normalize::has_scheme;

/// Borrowed view of an absolute URL's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UrlParts<'a> {
    /// `scheme://authority`
    pub head: &'a str,
    /// Path including its leading `/` (may be empty)
    pub path: &'a str,
    /// Query without the `?`
    pub query: Option<&'a str>,
    /// Fragment without the `#`
    pub fragment: Option<&'a str>,
}

impl<'a> UrlParts<'a> {
    /// Splits an absolute URL, or returns `None` if it does not parse.
    pub fn split(url: &'a str) -> Option<Self> {
        if !has_scheme(url) || url::Url::parse(url).is_err() {
            return None;
        }

        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (url, None),
        };
        let (before_query, query) = match rest.split_once('?') {
            Some((before, query)) => (before, Some(query)),
            None => (rest, None),
        };

        let authority_start = before_query.find("://")? + 3;
        let path_start = before_query[authority_start..]
            .find('/')
            .map(|i| authority_start + i)
            .unwrap_or(before_query.len());

        Some(Self {
            head: &before_query[..path_start],
            path: &before_query[path_start..],
            query,
            fragment,
        })
    }

    /// Path segments, including the empty segment before the leading `/`.
    pub fn segments(&self) -> Vec<&'a str> {
        self.path.split('/').collect()
    }

    /// Query pairs as (decoded key, raw value).
    pub fn query_pairs(&self) -> Vec<(String, &'a str)> {
        self.query
            .map(|query| {
                query
                    .split('&')
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| {
                        let raw_value = segment.split_once('=').map(|(_, v)| v).unwrap_or("");
                        (decode_key(segment), raw_value)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rebuilds the URL with a different path.
    pub fn with_path(&self, path: &str) -> String {
        assemble(self.head, path, self.query, self.fragment)
    }

    /// Rebuilds the URL with a different query.
    pub fn with_query(&self, query: &str) -> String {
        assemble(self.head, self.path, Some(query), self.fragment)
    }
}

fn assemble(head: &str, path: &str, query: Option<&str>, fragment: Option<&str>) -> String {
    let mut out = String::with_capacity(head.len() + path.len() + 32);
    out.push_str(head);
    out.push_str(path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

fn decode_key(segment: &str) -> String {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

/// Sets or replaces query parameters, keeping every other pair byte-for-byte.
///
/// A key that appears more than once keeps only its first (replaced)
/// occurrence. Keys not present are appended in `params` order.
pub(crate) fn set_query_params(query: Option<&str>, params: &[(&str, String)]) -> String {
    let mut written = vec![false; params.len()];
    let mut segments: Vec<String> = Vec::new();

    for segment in query.unwrap_or("").split('&').filter(|s| !s.is_empty()) {
        let key = decode_key(segment);
        match params.iter().position(|(name, _)| *name == key) {
            Some(idx) if !written[idx] => {
                written[idx] = true;
                segments.push(format!("{}={}", params[idx].0, params[idx].1));
            }
            Some(_) => {}
            None => segments.push(segment.to_string()),
        }
    }

    for (idx, (name, value)) in params.iter().enumerate() {
        if !written[idx] {
            segments.push(format!("{name}={value}"));
        }
    }

    segments.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_components() {
        let parts = UrlParts::split("https://img.example.com:8443/a/b.jpg?w=1&x=y#frag").unwrap();
        assert_eq!(parts.head, "https://img.example.com:8443");
        assert_eq!(parts.path, "/a/b.jpg");
        assert_eq!(parts.query, Some("w=1&x=y"));
        assert_eq!(parts.fragment, Some("frag"));
        assert_eq!(parts.segments(), vec!["", "a", "b.jpg"]);
    }

    #[test]
    fn test_split_without_path() {
        let parts = UrlParts::split("https://example.com?w=1").unwrap();
        assert_eq!(parts.head, "https://example.com");
        assert_eq!(parts.path, "");
        assert_eq!(parts.with_query("w=2"), "https://example.com?w=2");
    }

    #[test]
    fn test_split_rejects_relative_and_invalid() {
        assert!(UrlParts::split("/images/a.jpg").is_none());
        assert!(UrlParts::split("not a url").is_none());
        assert!(UrlParts::split("https://example.com:notaport/a.jpg").is_none());
    }

    #[test]
    fn test_query_pairs_decode_keys() {
        let parts = UrlParts::split("https://example.com/a?Width=100&q%5F=5&flag").unwrap();
        let pairs = parts.query_pairs();
        assert_eq!(pairs[0], ("Width".to_string(), "100"));
        assert_eq!(pairs[1], ("q_".to_string(), "5"));
        assert_eq!(pairs[2], ("flag".to_string(), ""));
    }

    #[test]
    fn test_set_query_params_replaces_and_appends() {
        let query = set_query_params(
            Some("w=100&name=a%20b&h=50"),
            &[("w", "800".to_string()), ("q", "75".to_string())],
        );
        assert_eq!(query, "w=800&name=a%20b&h=50&q=75");
    }

    #[test]
    fn test_set_query_params_drops_duplicate_keys() {
        let query = set_query_params(Some("w=1&w=2&x=3"), &[("w", "10".to_string())]);
        assert_eq!(query, "w=10&x=3");
    }

    #[test]
    fn test_set_query_params_on_empty_query() {
        assert_eq!(
            set_query_params(None, &[("width", "300".to_string())]),
            "width=300"
        );
    }
}
