// Case-insensitive substring search over discovered URLs

use crate::error::{CoreError, Result};

/// Lower-cased, trimmed, non-empty search terms, in the order given.
///
/// A URL matches when it contains at least one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    /// Parse the comma separated value of `--search`.
    pub fn parse(raw: &str) -> Result<Self> {
        let terms: Vec<String> = raw
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            return Err(CoreError::EmptySearch);
        }

        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, url: &str) -> bool {
        let lowered = url.to_lowercase();
        self.terms.iter().any(|term| lowered.contains(term.as_str()))
    }
}

/// Search predicate; an absent term list matches everything.
pub fn matches_search(url: &str, terms: Option<&SearchTerms>) -> bool {
    terms.is_none_or(|t| t.matches(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_terms() {
        let terms = SearchTerms::parse(" MP4, ,cdn ,,").unwrap();
        assert_eq!(terms.terms(), ["mp4", "cdn"]);
    }

    #[test]
    fn parse_rejects_only_separators() {
        assert!(matches!(
            SearchTerms::parse(", ,"),
            Err(CoreError::EmptySearch)
        ));
    }

    #[test]
    fn matching_is_case_insensitive_or() {
        let terms = SearchTerms::parse("mp4,json").unwrap();
        assert!(matches_search("HTTPS://X.COM/A.MP4", Some(&terms)));
        assert!(matches_search("https://x.com/data.json", Some(&terms)));
        assert!(!matches_search("https://x.com/a.png", Some(&terms)));
    }

    #[test]
    fn absent_terms_match_everything() {
        assert!(matches_search("anything", None));
    }
}
