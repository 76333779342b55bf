// URL categorization under the two taxonomies

use std::fmt;

use url::Url;

const FRAMEWORK_SCRIPT_SUFFIXES: [&str; 2] = [".bundle.js", ".chunk.js"];
const SCRIPT_EXT: [&str; 2] = [".js", ".mjs"];
const MEDIA_EXT: [&str; 10] = [
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".mp4", ".mov", ".wav",
];
const DOC_EXT: [&str; 9] = [
    ".json", ".xml", ".yml", ".yaml", ".pdf", ".txt", ".doc", ".docx", ".csv",
];
const HTML_EXT: [&str; 2] = [".html", ".htm"];
const WASM_EXT: &str = ".wasm";

/// HTML scrape taxonomy. Declaration order is the report display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Scripts,
    Media,
    ApiEndpoints,
    DocumentsConfig,
    HtmlFramework,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Scripts,
        Category::Media,
        Category::ApiEndpoints,
        Category::DocumentsConfig,
        Category::HtmlFramework,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Scripts => "SCRIPTS",
            Category::Media => "MEDIA",
            Category::ApiEndpoints => "API / ENDPOINTS",
            Category::DocumentsConfig => "DOCUMENTS / CONFIG",
            Category::HtmlFramework => "HTML / FRAMEWORK",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Live network capture taxonomy. Declaration order is the report display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NetworkResourceType {
    FetchXhr,
    Doc,
    Css,
    Js,
    Font,
    Img,
    Media,
    Manifest,
    Socket,
    Wasm,
    Other,
}

impl NetworkResourceType {
    pub const ALL: [NetworkResourceType; 11] = [
        NetworkResourceType::FetchXhr,
        NetworkResourceType::Doc,
        NetworkResourceType::Css,
        NetworkResourceType::Js,
        NetworkResourceType::Font,
        NetworkResourceType::Img,
        NetworkResourceType::Media,
        NetworkResourceType::Manifest,
        NetworkResourceType::Socket,
        NetworkResourceType::Wasm,
        NetworkResourceType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NetworkResourceType::FetchXhr => "Fetch/XHR",
            NetworkResourceType::Doc => "Doc",
            NetworkResourceType::Css => "CSS",
            NetworkResourceType::Js => "JS",
            NetworkResourceType::Font => "Font",
            NetworkResourceType::Img => "Img",
            NetworkResourceType::Media => "Media",
            NetworkResourceType::Manifest => "Manifest",
            NetworkResourceType::Socket => "Socket",
            NetworkResourceType::Wasm => "Wasm",
            NetworkResourceType::Other => "Other",
        }
    }
}

impl fmt::Display for NetworkResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extension of the last path segment, lower-cased and including the dot.
///
/// Leading dots of the segment do not start an extension (`/.env` has none).
pub fn path_extension(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next().unwrap_or("");
    let stem_start = segment.len() - segment.trim_start_matches('.').len();
    let dot = segment[stem_start..].rfind('.')?;
    Some(segment[stem_start + dot..].to_lowercase())
}

struct UrlParts {
    host: String,
    path: String,
    query: Option<String>,
}

// Strict parsing first, then a plain split so templated URLs like
// `https://x.com:${PORT}/api/v1` still expose their path.
fn url_parts(url: &str) -> Option<UrlParts> {
    if let Ok(parsed) = Url::parse(url) {
        return Some(UrlParts {
            host: parsed.host_str().unwrap_or("").to_string(),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
        });
    }

    let (scheme, rest) = url.split_once("://")?;
    if scheme.is_empty() || rest.is_empty() {
        return None;
    }
    let rest = rest.split('#').next().unwrap_or("");
    let (before_query, query) = match rest.split_once('?') {
        Some((before, query)) => (before, Some(query.to_string())),
        None => (rest, None),
    };
    let (host, path) = match before_query.find('/') {
        Some(i) => before_query.split_at(i),
        None => (before_query, ""),
    };

    Some(UrlParts {
        host: host.to_string(),
        path: path.to_string(),
        query,
    })
}

pub fn url_extension(url: &str) -> Option<String> {
    path_extension(&url_parts(url)?.path)
}

pub fn classify_html(url: &str) -> Category {
    let Some(parts) = url_parts(url) else {
        return Category::Other;
    };

    let path = parts.path.to_lowercase();
    let ext = path_extension(&path).unwrap_or_default();
    let ext = ext.as_str();

    if FRAMEWORK_SCRIPT_SUFFIXES.iter().any(|s| path.ends_with(s)) {
        return Category::HtmlFramework;
    }
    if SCRIPT_EXT.contains(&ext) {
        return Category::Scripts;
    }
    if MEDIA_EXT.contains(&ext) {
        return Category::Media;
    }
    if DOC_EXT.contains(&ext) {
        return Category::DocumentsConfig;
    }
    if HTML_EXT.contains(&ext) {
        return Category::HtmlFramework;
    }

    let host_and_path = format!("{}{}", parts.host, path).to_lowercase();
    if path.contains("/api/") || host_and_path.contains("graphql") {
        return Category::ApiEndpoints;
    }
    if ext.is_empty() && parts.query.is_some_and(|q| !q.is_empty()) {
        return Category::ApiEndpoints;
    }

    // Fonts (.woff, .woff2, .ttf, .otf) deliberately land here.
    Category::Other
}

pub fn classify_network(resource_kind: &str, url: &str) -> NetworkResourceType {
    match resource_kind.to_lowercase().as_str() {
        "xhr" | "fetch" => NetworkResourceType::FetchXhr,
        "document" => NetworkResourceType::Doc,
        "stylesheet" => NetworkResourceType::Css,
        "script" => NetworkResourceType::Js,
        "font" => NetworkResourceType::Font,
        "image" => NetworkResourceType::Img,
        "media" => NetworkResourceType::Media,
        "manifest" => NetworkResourceType::Manifest,
        "websocket" | "eventsource" => NetworkResourceType::Socket,
        _ if url.to_lowercase().ends_with(WASM_EXT) => NetworkResourceType::Wasm,
        _ => NetworkResourceType::Other,
    }
}
