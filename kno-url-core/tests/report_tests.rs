// Tests for grouping and rendering reports

use kno_url_core::options::resolve_line;
use kno_url_core::report::{CaptureCollector, Report, group_html};
use kno_url_core::{Category, NetworkResourceType};

fn sample_urls() -> Vec<&'static str> {
    vec![
        "https://x.com/static/app.js",
        "https://x.com/static/vendor.chunk.js",
        "https://x.com/img/logo.png",
        "https://x.com/img/hero.jpg",
        "https://x.com/api/v1/users",
        "https://x.com/search?q=1",
        "https://x.com/robots.txt",
        "https://x.com/about",
        "https://x.com/font.woff2",
        "https://x.com/img/logo.png",
    ]
}

// ============================================================================
// HTML Grouping Tests
// ============================================================================

#[test]
fn test_group_html_renders_canonical_order() {
    let op = resolve_line("x.com").unwrap();
    let report = group_html(sample_urls(), &op);

    let expected = "\
SCRIPTS
https://x.com/static/app.js

MEDIA
https://x.com/img/hero.jpg
https://x.com/img/logo.png

API / ENDPOINTS
https://x.com/api/v1/users
https://x.com/search?q=1

DOCUMENTS / CONFIG
https://x.com/robots.txt

HTML / FRAMEWORK
https://x.com/static/vendor.chunk.js

OTHER
https://x.com/font.woff2
https://x.com/about";

    assert_eq!(report.render(), expected);
    assert_eq!(report.len(), 9);
}

#[test]
fn test_group_html_applies_categories_and_search() {
    let op = resolve_line("x.com -md -s --search logo,app").unwrap();
    let report = group_html(sample_urls(), &op);
    assert_eq!(
        report.render(),
        "SCRIPTS\nhttps://x.com/static/app.js\n\nMEDIA\nhttps://x.com/img/logo.png"
    );
}

#[test]
fn test_group_html_no_media_excludes() {
    let op = resolve_line("x.com --no-media -md -O -a -d -ht").unwrap();
    let report = group_html(sample_urls(), &op);
    assert_eq!(report.render(), "SCRIPTS\nhttps://x.com/static/app.js");
}

#[test]
fn test_group_html_no_matches() {
    let op = resolve_line("x.com --search nothing-here").unwrap();
    let report = group_html(sample_urls(), &op);
    assert!(report.is_empty());
    assert_eq!(
        report.render_or_notice(),
        "No URLs matched the selected filters."
    );
}

#[test]
fn test_render_is_deterministic() {
    let op = resolve_line("x.com").unwrap();
    let mut reversed = sample_urls();
    reversed.reverse();

    let first = group_html(sample_urls(), &op).render();
    let second = group_html(sample_urls(), &op).render();
    let third = group_html(reversed, &op).render();
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_extension_order_inside_group() {
    let mut report = Report::new();
    report.insert(Category::Media, "https://b.com/z.gif");
    report.insert(Category::Media, "https://a.com/y.png");
    report.insert(Category::Media, "https://a.com/a.png");
    report.insert(Category::Media, "https://c.com/x.GIF");

    assert_eq!(
        report.render(),
        "MEDIA\nhttps://b.com/z.gif\nhttps://c.com/x.GIF\nhttps://a.com/a.png\nhttps://a.com/y.png"
    );
}

// ============================================================================
// Capture Collector Tests
// ============================================================================

#[test]
fn test_collector_filters_types() {
    let op = resolve_line("x.com -n --live -js").unwrap();
    let mut collector = CaptureCollector::new(&op);

    assert_eq!(
        collector.record("script", "https://x.com/a.js"),
        Some(NetworkResourceType::Js)
    );
    assert_eq!(collector.record("image", "https://x.com/a.png"), None);
    assert_eq!(collector.report().len(), 1);
}

#[test]
fn test_collector_applies_search() {
    let op = resolve_line("x.com -n -t 5 --search cdn").unwrap();
    let mut collector = CaptureCollector::new(&op);

    assert!(collector.record("image", "https://cdn.x.com/a.png").is_some());
    assert!(collector.record("image", "https://x.com/b.png").is_none());
}

#[test]
fn test_collector_renders_network_order() {
    let op = resolve_line("x.com -n -t 5").unwrap();
    let mut collector = CaptureCollector::new(&op);
    collector.record("image", "https://x.com/a.png");
    collector.record("fetch", "https://x.com/api/data");
    collector.record("other", "https://x.com/app.wasm");
    collector.record("fetch", "https://x.com/api/data");

    assert_eq!(
        collector.into_report().render(),
        "Fetch/XHR\nhttps://x.com/api/data\n\nImg\nhttps://x.com/a.png\n\nWasm\nhttps://x.com/app.wasm"
    );
}

#[test]
fn test_collector_empty_notice() {
    let op = resolve_line("x.com -n -t 5 -css").unwrap();
    let collector = CaptureCollector::new(&op);
    assert_eq!(
        collector.report().render_or_notice(),
        "No network requests matched the selected filters."
    );
}
