// Fixed flag vocabularies of the interactive grammar

use crate::classify::{Category, NetworkResourceType};

pub const EXPLICIT_URL_FLAG: &str = "-u";
pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
pub const OUTPUT_FLAG: &str = "-o";
pub const SEARCH_FLAG: &str = "--search";
pub const FULL_FLAG: &str = "--full";
pub const NO_MEDIA_FLAG: &str = "--no-media";
pub const NETWORK_FLAG: &str = "-n";
pub const DURATION_FLAG: &str = "-t";
pub const LIVE_FLAG: &str = "--live";
pub const NIGHT_OPS_FLAG: &str = "--night-ops";
pub const SCHEDULE_FLAG: &str = "-sd";

/// HTML-mode category flags, in display order.
pub const HTML_CATEGORY_FLAGS: [(&str, Category); 6] = [
    ("-s", Category::Scripts),
    ("-md", Category::Media),
    ("-a", Category::ApiEndpoints),
    ("-d", Category::DocumentsConfig),
    ("-ht", Category::HtmlFramework),
    ("-O", Category::Other),
];

/// Network-mode resource type flags, in display order.
pub const NETWORK_TYPE_FLAGS: [(&str, NetworkResourceType); 11] = [
    ("-fx", NetworkResourceType::FetchXhr),
    ("-d", NetworkResourceType::Doc),
    ("-css", NetworkResourceType::Css),
    ("-js", NetworkResourceType::Js),
    ("-f", NetworkResourceType::Font),
    ("-img", NetworkResourceType::Img),
    ("-md", NetworkResourceType::Media),
    ("-mf", NetworkResourceType::Manifest),
    ("-s", NetworkResourceType::Socket),
    ("-wasm", NetworkResourceType::Wasm),
    ("-O", NetworkResourceType::Other),
];

pub const GLOBAL_FLAGS: [&str; 12] = [
    EXPLICIT_URL_FLAG,
    "-h",
    "--help",
    OUTPUT_FLAG,
    SEARCH_FLAG,
    FULL_FLAG,
    NO_MEDIA_FLAG,
    NETWORK_FLAG,
    DURATION_FLAG,
    LIVE_FLAG,
    NIGHT_OPS_FLAG,
    SCHEDULE_FLAG,
];

pub fn is_help_flag(token: &str) -> bool {
    HELP_FLAGS.contains(&token)
}

pub fn html_category_for_flag(flag: &str) -> Option<Category> {
    HTML_CATEGORY_FLAGS
        .iter()
        .find(|(f, _)| *f == flag)
        .map(|(_, c)| *c)
}

pub fn network_type_for_flag(flag: &str) -> Option<NetworkResourceType> {
    NETWORK_TYPE_FLAGS
        .iter()
        .find(|(f, _)| *f == flag)
        .map(|(_, t)| *t)
}

/// Whether `flag` belongs to either taxonomy or the global set.
pub fn is_known_flag(flag: &str) -> bool {
    GLOBAL_FLAGS.contains(&flag)
        || html_category_for_flag(flag).is_some()
        || network_type_for_flag(flag).is_some()
}

/// Flags that only mean something in HTML mode and are ignored under `-n`.
pub fn is_html_only_flag(flag: &str) -> bool {
    flag == NO_MEDIA_FLAG
        || (html_category_for_flag(flag).is_some() && network_type_for_flag(flag).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_flags_map_into_both_taxonomies() {
        assert_eq!(html_category_for_flag("-s"), Some(Category::Scripts));
        assert_eq!(network_type_for_flag("-s"), Some(NetworkResourceType::Socket));
        assert_eq!(html_category_for_flag("-d"), Some(Category::DocumentsConfig));
        assert_eq!(network_type_for_flag("-d"), Some(NetworkResourceType::Doc));
    }

    #[test]
    fn html_only_flags() {
        assert!(is_html_only_flag("-a"));
        assert!(is_html_only_flag("-ht"));
        assert!(is_html_only_flag("--no-media"));
        assert!(!is_html_only_flag("-md"));
        assert!(!is_html_only_flag("-js"));
    }

    #[test]
    fn known_flags() {
        for flag in ["-u", "-o", "--search", "-sd", "--night-ops", "-wasm", "-ht"] {
            assert!(is_known_flag(flag), "{flag} should be known");
        }
        assert!(!is_known_flag("-x"));
        assert!(!is_known_flag("--verbose"));
    }
}
