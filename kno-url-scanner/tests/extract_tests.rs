// Tests for URL extraction from page text

use kno_url_scanner::extract::{contains_blob, extract_urls};

const BASE: &str = "https://example.com/video/x9";

// ============================================================================
// Absolute and Blob URLs
// ============================================================================

#[test]
fn test_extract_absolute_urls() {
    let html = r#"<script src="https://cdn.example.com/app.js"></script>
        <img src='http://img.example.com/a.png'>"#;
    let urls = extract_urls(html, BASE);
    assert!(urls.contains("https://cdn.example.com/app.js"));
    assert!(urls.contains("http://img.example.com/a.png"));
}

#[test]
fn test_extract_stops_at_terminators() {
    let html = "see https://a.com/x<br> and \"https://b.com/y\" or https://c.com/z\nnext";
    let urls = extract_urls(html, BASE);
    assert!(urls.contains("https://a.com/x"));
    assert!(urls.contains("https://b.com/y"));
    assert!(urls.contains("https://c.com/z"));
}

#[test]
fn test_extract_blob_urls_kept_whole() {
    let html = r#"<video src="blob:https://example.com/1234-abcd"></video>"#;
    let urls = extract_urls(html, BASE);
    assert!(urls.contains("blob:https://example.com/1234-abcd"));
    assert!(!urls.contains("https://example.com/1234-abcd"));
    assert!(contains_blob(&urls));
}

#[test]
fn test_no_blob_detected() {
    let urls = extract_urls(r#"<a href="https://a.com">a</a>"#, BASE);
    assert!(!contains_blob(&urls));
}

// ============================================================================
// Protocol Relative and Fragment Links
// ============================================================================

#[test]
fn test_extract_protocol_relative_uses_base_scheme() {
    let html = r#"<script src="//static.example.com/lib.js"></script>"#;
    let urls = extract_urls(html, "http://example.com/");
    assert!(urls.contains("http://static.example.com/lib.js"));
}

#[test]
fn test_protocol_relative_ignores_scheme_separators() {
    let html = r#"<a href="https://a.com/page">a</a>"#;
    let urls = extract_urls(html, BASE);
    assert_eq!(urls.len(), 1);
    assert!(urls.contains("https://a.com/page"));
}

#[test]
fn test_extract_fragment_links() {
    let html = r##"<a href="#comments">c</a><a href="#">top</a>"##;
    let urls = extract_urls(html, BASE);
    assert!(urls.contains("https://example.com/video/x9#comments"));
    assert!(!urls.iter().any(|u| u.ends_with('#')));
}

#[test]
fn test_duplicates_collapse() {
    let html = "https://a.com/x https://a.com/x https://a.com/x";
    let urls = extract_urls(html, BASE);
    assert_eq!(urls.len(), 1);
}

#[test]
fn test_empty_text() {
    assert!(extract_urls("", BASE).is_empty());
}
