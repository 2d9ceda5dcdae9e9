//! Image URL analysis and rewriting through the public API.

use proptest::prelude::*;
use urlsift::{
    analyze_image_url, capabilities_for, cdn_patterns, detect_cdn, generate_url, CdnType,
    ImageRequest, ManipulationCapabilities, ManipulationStrategy,
};

fn width(w: u32) -> ImageRequest {
    ImageRequest {
        width: Some(w),
        ..Default::default()
    }
}

#[test]
fn test_cdn_with_generic_params_is_cdn_specific() {
    let url = "https://images.unsplash.com/photo-1500?w=400&h=300&fit=crop";
    let caps = analyze_image_url(url);
    assert_eq!(caps.strategy, ManipulationStrategy::CdnSpecific);
    assert_eq!(caps.cdn_type, Some(CdnType::Unsplash));

    assert_eq!(
        generate_url(&caps, url, &width(1200)),
        "https://images.unsplash.com/photo-1500?w=1200&h=300&fit=crop&auto=format"
    );
}

#[test]
fn test_width_clamped_to_cdn_maximum() {
    let url = "https://res.cloudinary.com/demo/image/upload/sample.jpg";
    let caps = analyze_image_url(url);
    assert_eq!(caps.max_width, Some(5000));
    let out = generate_url(&caps, url, &width(999_999));
    assert!(out.contains("5000"), "{out}");
    assert!(!out.contains("999999"), "{out}");
}

#[test]
fn test_descriptor_json_shape() {
    let caps = analyze_image_url("https://example.com/a.jpg?width=300");
    let json = serde_json::to_value(&caps).unwrap();
    assert_eq!(json["strategy"], "queryParameters");
    assert_eq!(json["cdnType"], serde_json::Value::Null);
    assert_eq!(json["widthParamName"], "width");
    assert_eq!(json["canAdjustWidth"], true);

    let caps = analyze_image_url("https://acme.imgix.net/a.jpg");
    let json = serde_json::to_value(&caps).unwrap();
    assert_eq!(json["strategy"], "cdnSpecific");
    assert_eq!(json["cdnType"], "imgix");

    let back: ManipulationCapabilities = serde_json::from_value(json).unwrap();
    assert_eq!(back, caps);
}

#[test]
fn test_registry_rows_are_detectable_by_their_markers() {
    for pattern in cdn_patterns() {
        for marker in pattern.matchers {
            let url = if marker.starts_with('/') {
                format!("https://example.com{marker}a.jpg")
            } else if marker.starts_with('.') {
                format!("https://img{marker}/a.jpg")
            } else if marker.contains('/') {
                format!("https://example.com/{marker}/a.jpg")
            } else {
                format!("https://{marker}/a.jpg")
            };
            assert_eq!(detect_cdn(&url), pattern.cdn_type, "{url}");
        }
    }
}

#[test]
fn test_rewriting_with_foreign_descriptor_is_safe() {
    let caps = capabilities_for(CdnType::Cloudinary);
    let url = "https://example.com/no/anchor/here.jpg";
    assert_eq!(generate_url(&caps, url, &width(100)), url);
}

fn arb_image_url() -> impl Strategy<Value = String> {
    let hosts = prop::sample::select(vec![
        "example.com",
        "res.cloudinary.com",
        "acme.imgix.net",
        "cdn.shopify.com",
        "pbs.twimg.com",
        "blog.example.com",
    ]);
    let paths = prop::sample::select(vec![
        "/image/upload/a.jpg",
        "/img/800x600/a.jpg",
        "/w640/a.png",
        "/wp-content/uploads/a-300x200.jpg",
        "/plain.jpg",
        "",
    ]);
    let queries = prop::sample::select(vec!["", "?w=100", "?Width=5&q=80", "?x=1&h=abc", "?"]);
    (hosts, paths, queries).prop_map(|(h, p, q)| format!("https://{h}{p}{q}"))
}

proptest! {
    #[test]
    fn prop_analysis_is_consistent(url in arb_image_url()) {
        prop_assert!(analyze_image_url(&url).is_consistent());
    }

    #[test]
    fn prop_empty_request_is_identity(url in arb_image_url()) {
        let caps = analyze_image_url(&url);
        prop_assert_eq!(generate_url(&caps, &url, &ImageRequest::default()), url);
    }

    #[test]
    fn prop_none_strategy_is_identity(
        url in arb_image_url(),
        w in proptest::option::of(any::<u32>()),
        h in proptest::option::of(any::<u32>()),
        q in proptest::option::of(any::<u32>()),
    ) {
        let caps = ManipulationCapabilities::none();
        let request = ImageRequest { width: w, height: h, quality: q };
        prop_assert_eq!(generate_url(&caps, &url, &request), url);
    }

    #[test]
    fn prop_arbitrary_input_never_panics(s in ".{0,80}", w in any::<u32>()) {
        let caps = analyze_image_url(&s);
        let _ = generate_url(&caps, &s, &width(w));
    }
}
