// Splitting an interactive line into a target URL and residual flag tokens

use crate::flags::{EXPLICIT_URL_FLAG, is_help_flag};

/// What the first stage of line parsing found in place of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTarget {
    /// No URL-looking token.
    Absent,
    /// The line was only `-h` or `--help`.
    Help,
    /// A scheme-normalized URL candidate.
    Url(String),
}

/// A tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub target: LineTarget,
    pub args: Vec<String>,
}

impl ParsedLine {
    fn new(target: LineTarget, args: Vec<String>) -> Self {
        Self { target, args }
    }
}

/// Infer an `https://` scheme for bare hosts.
///
/// Tokens that already carry `http://` or `https://` are returned unchanged,
/// as are tokens with no `.` or `:` which cannot be hosts.
pub fn normalize_url_candidate(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }
    if raw.starts_with("www.") || raw.contains('.') || raw.contains(':') {
        return format!("https://{raw}");
    }
    raw.to_string()
}

fn looks_like_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://") || token.starts_with("www.")
}

/// Split a line into its target and the remaining tokens, in order.
pub fn parse_line(line: &str) -> ParsedLine {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        [] => ParsedLine::new(LineTarget::Absent, Vec::new()),
        [only] if is_help_flag(only) => ParsedLine::new(LineTarget::Help, Vec::new()),
        [flag, url, rest @ ..] if *flag == EXPLICIT_URL_FLAG => ParsedLine::new(
            LineTarget::Url(normalize_url_candidate(url)),
            owned(rest),
        ),
        [first, rest @ ..] if !first.starts_with('-') => ParsedLine::new(
            LineTarget::Url(normalize_url_candidate(first)),
            owned(rest),
        ),
        _ => match tokens.iter().position(|t| looks_like_url(t)) {
            Some(index) => {
                let args = tokens
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, t)| t.to_string())
                    .collect();
                ParsedLine::new(
                    LineTarget::Url(normalize_url_candidate(tokens[index])),
                    args,
                )
            }
            None => ParsedLine::new(LineTarget::Absent, owned(&tokens)),
        },
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
