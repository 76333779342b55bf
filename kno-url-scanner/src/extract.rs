// Pulling candidate URLs out of raw page text

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

static ABSOLUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s'"<>]+"#).expect("hardcoded regex pattern is valid")
});
static BLOB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"blob:[^\s'"<>]+"#).expect("hardcoded regex pattern is valid"));
static PROTOCOL_RELATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"//[^\s'"<>]+"#).expect("hardcoded regex pattern is valid"));

/// Collect every URL-looking string in `text`.
///
/// Picks up absolute `http(s)://` URLs (except those wrapped in `blob:`),
/// `blob:` URLs, protocol-relative `//...` references (given the scheme of
/// `base_url`) and `href="#..."` anchors resolved against `base_url`.
pub fn extract_urls(text: &str, base_url: &str) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    let base = Url::parse(base_url).ok();

    for found in find_not_preceded_by(&ABSOLUTE_RE, text, "blob:") {
        urls.insert(found.to_string());
    }

    for found in BLOB_RE.find_iter(text) {
        urls.insert(found.as_str().to_string());
    }

    let scheme = base.as_ref().map(Url::scheme).unwrap_or("https");
    for found in find_not_preceded_by(&PROTOCOL_RELATIVE_RE, text, ":") {
        urls.insert(format!("{scheme}:{found}"));
    }

    if let Some(base) = &base {
        urls.extend(fragment_links(text, base));
    }

    urls
}

/// Whether any collected URL is a `blob:` URL, which only a live browser
/// can resolve.
pub fn contains_blob(urls: &BTreeSet<String>) -> bool {
    urls.iter().any(|u| u.starts_with("blob:"))
}

/// Leftmost-first matches of `re` whose start is not directly preceded by
/// `forbidden`. A rejected match restarts the search one byte later.
fn find_not_preceded_by<'h>(re: &Regex, haystack: &'h str, forbidden: &str) -> Vec<&'h str> {
    let mut found = Vec::new();
    let mut at = 0;

    while let Some(m) = re.find_at(haystack, at) {
        if haystack[..m.start()].ends_with(forbidden) {
            // Every pattern starts with an ASCII byte.
            at = m.start() + 1;
            continue;
        }
        found.push(m.as_str());
        at = m.end();
    }

    found
}

fn fragment_links(text: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(text);
    let Ok(selector) = Selector::parse("[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.len() > 1 && href.starts_with('#'))
        .filter_map(|href| base.join(href).ok())
        .map(|url| url.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookbehind_rejects_then_rescans() {
        let text = "blob:https://x.com/a?next=http://y.com/b";
        let found = find_not_preceded_by(&ABSOLUTE_RE, text, "blob:");
        assert_eq!(found, ["http://y.com/b"]);
    }

    #[test]
    fn protocol_relative_skips_scheme_separator() {
        let text = "https://a.com/x";
        assert!(find_not_preceded_by(&PROTOCOL_RELATIVE_RE, text, ":").is_empty());
    }
}
