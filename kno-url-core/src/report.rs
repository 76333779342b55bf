// Grouping discovered URLs and rendering the text report

use std::collections::{BTreeMap, BTreeSet};

use crate::classify::{Category, NetworkResourceType, classify_html, classify_network, url_extension};
use crate::options::Operation;
use crate::search::SearchTerms;

/// A report group key. `Ord` must follow the display order.
pub trait ReportKey: Ord + Copy {
    /// Shown instead of the report when every group is empty.
    const NO_MATCHES: &'static str;

    fn label(&self) -> &'static str;
}

impl ReportKey for Category {
    const NO_MATCHES: &'static str = "No URLs matched the selected filters.";

    fn label(&self) -> &'static str {
        Category::label(self)
    }
}

impl ReportKey for NetworkResourceType {
    const NO_MATCHES: &'static str = "No network requests matched the selected filters.";

    fn label(&self) -> &'static str {
        NetworkResourceType::label(self)
    }
}

/// Unique URLs per group. Duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<K> {
    groups: BTreeMap<K, BTreeSet<String>>,
}

impl<K> Default for Report<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<K: ReportKey> Report<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the URL was already in the group.
    pub fn insert(&mut self, key: K, url: impl Into<String>) -> bool {
        self.groups.entry(key).or_default().insert(url.into())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(BTreeSet::is_empty)
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    pub fn group(&self, key: K) -> Option<&BTreeSet<String>> {
        self.groups.get(&key)
    }

    /// Render the grouped block; an empty string when nothing matched.
    ///
    /// Within a group, URLs with a path extension come first ordered by
    /// (extension, URL), then the rest in plain lexical order.
    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();

        for (key, urls) in &self.groups {
            if urls.is_empty() {
                continue;
            }
            lines.push(key.label());
            lines.extend(ordered(urls));
            lines.push("");
        }

        lines.join("\n").trim().to_string()
    }

    pub fn render_or_notice(&self) -> String {
        let text = self.render();
        if text.is_empty() {
            K::NO_MATCHES.to_string()
        } else {
            text
        }
    }
}

fn ordered(urls: &BTreeSet<String>) -> Vec<&str> {
    let mut with_ext: Vec<(String, &str)> = Vec::new();
    let mut without_ext: Vec<&str> = Vec::new();

    for url in urls {
        match url_extension(url) {
            Some(ext) => with_ext.push((ext, url.as_str())),
            None => without_ext.push(url.as_str()),
        }
    }

    with_ext.sort();
    // BTreeSet iteration already yields lexical order.
    with_ext
        .into_iter()
        .map(|(_, url)| url)
        .chain(without_ext)
        .collect()
}

pub fn group_html<'a, I>(urls: I, operation: &Operation) -> Report<Category>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = Report::new();
    for url in urls {
        if !operation.matches_search(url) {
            continue;
        }
        let category = classify_html(url);
        if operation.keeps_category(category) {
            report.insert(category, url);
        }
    }
    report
}

/// Accumulates capture events as they arrive, applying type and search filters.
#[derive(Debug, Clone)]
pub struct CaptureCollector {
    types: BTreeSet<NetworkResourceType>,
    search: Option<SearchTerms>,
    report: Report<NetworkResourceType>,
}

impl CaptureCollector {
    pub fn new(operation: &Operation) -> Self {
        Self {
            types: operation.network_types().clone(),
            search: operation.search().cloned(),
            report: Report::new(),
        }
    }

    /// Record one request. Returns its type when the request was kept.
    pub fn record(&mut self, resource_kind: &str, url: &str) -> Option<NetworkResourceType> {
        let kind = classify_network(resource_kind, url);
        if !self.types.is_empty() && !self.types.contains(&kind) {
            return None;
        }
        if !crate::search::matches_search(url, self.search.as_ref()) {
            return None;
        }
        self.report.insert(kind, url);
        Some(kind)
    }

    pub fn report(&self) -> &Report<NetworkResourceType> {
        &self.report
    }

    pub fn into_report(self) -> Report<NetworkResourceType> {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_entries_sort_before_bare_ones() {
        let mut report = Report::new();
        report.insert(Category::Other, "https://x.com/zzz");
        report.insert(Category::Other, "https://x.com/b.woff");
        report.insert(Category::Other, "https://x.com/a.ttf");
        report.insert(Category::Other, "https://x.com/aaa");

        assert_eq!(
            report.render(),
            "OTHER\nhttps://x.com/a.ttf\nhttps://x.com/b.woff\nhttps://x.com/aaa\nhttps://x.com/zzz"
        );
    }

    #[test]
    fn empty_report_uses_notice() {
        let report: Report<NetworkResourceType> = Report::new();
        assert!(report.is_empty());
        assert_eq!(report.render(), "");
        assert_eq!(
            report.render_or_notice(),
            "No network requests matched the selected filters."
        );
    }

    #[test]
    fn duplicates_collapse() {
        let mut report = Report::new();
        assert!(report.insert(Category::Media, "https://x.com/a.png"));
        assert!(!report.insert(Category::Media, "https://x.com/a.png"));
        assert_eq!(report.len(), 1);
    }
}
