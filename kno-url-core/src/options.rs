// Turning one interactive line into a validated Operation.
//
// Flag scanning runs small parsers over the residual token slice; each reports
// how many tokens it consumed. All validation happens before any fetch or
// capture.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::classify::{Category, NetworkResourceType};
use crate::duration::parse_duration;
use crate::error::{CoreError, Result};
use crate::flags::{
    DURATION_FLAG, FULL_FLAG, LIVE_FLAG, NETWORK_FLAG, NIGHT_OPS_FLAG, NO_MEDIA_FLAG, OUTPUT_FLAG,
    SCHEDULE_FLAG, SEARCH_FLAG, html_category_for_flag, is_html_only_flag, is_known_flag,
    network_type_for_flag,
};
use crate::input::{LineTarget, ParsedLine, parse_line};
use crate::search::{SearchTerms, matches_search};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Help,
    Cleanup,
    HtmlScrape,
    FullDump,
    NetworkCapture,
}

/// HTML category selection.
///
/// Inclusion and exclusion never coexist: `--no-media` turns the collected
/// category flags into exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Include(BTreeSet<Category>),
    Exclude(BTreeSet<Category>),
}

impl CategoryFilter {
    pub fn keeps(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Include(set) => set.contains(&category),
            CategoryFilter::Exclude(set) => !set.contains(&category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureWindow {
    Timed { seconds: u64 },
    /// Until interrupted.
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// HTML-only flags given together with `-n`.
    IgnoredHtmlFlags(Vec<String>),
    /// Tokens given alongside a standalone `--night-ops`.
    IgnoredCleanupArgs(Vec<String>),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::IgnoredHtmlFlags(flags) => write!(
                f,
                "Detected HTML-mode-only flags in network mode: {}. These will be ignored in network mode.",
                flags.join(", ")
            ),
            Warning::IgnoredCleanupArgs(tokens) => write!(
                f,
                "--night-ops without a URL runs cleanup only; ignoring: {}",
                tokens.join(" ")
            ),
        }
    }
}

/// A validated plan for one command. Built once per line and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    target_url: Option<String>,
    mode: Mode,
    categories: CategoryFilter,
    network_types: BTreeSet<NetworkResourceType>,
    search: Option<SearchTerms>,
    output_path: Option<PathBuf>,
    capture: Option<CaptureWindow>,
    scheduled_cleanup_secs: Option<u64>,
    warnings: Vec<Warning>,
}

impl Operation {
    fn bare(mode: Mode) -> Self {
        Self {
            target_url: None,
            mode,
            categories: CategoryFilter::All,
            network_types: BTreeSet::new(),
            search: None,
            output_path: None,
            capture: None,
            scheduled_cleanup_secs: None,
            warnings: Vec::new(),
        }
    }

    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn categories(&self) -> &CategoryFilter {
        &self.categories
    }

    /// Selected network types; empty means every type.
    pub fn network_types(&self) -> &BTreeSet<NetworkResourceType> {
        &self.network_types
    }

    pub fn search(&self) -> Option<&SearchTerms> {
        self.search.as_ref()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn capture(&self) -> Option<CaptureWindow> {
        self.capture
    }

    pub fn capture_duration_secs(&self) -> Option<u64> {
        match self.capture {
            Some(CaptureWindow::Timed { seconds }) => Some(seconds),
            _ => None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.capture == Some(CaptureWindow::Live)
    }

    /// Delay before a scheduled cleanup, only ever set alongside a URL.
    pub fn scheduled_cleanup_secs(&self) -> Option<u64> {
        self.scheduled_cleanup_secs
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn keeps_category(&self, category: Category) -> bool {
        self.categories.keeps(category)
    }

    pub fn keeps_network_type(&self, kind: NetworkResourceType) -> bool {
        self.network_types.is_empty() || self.network_types.contains(&kind)
    }

    pub fn matches_search(&self, url: &str) -> bool {
        matches_search(url, self.search.as_ref())
    }
}

pub fn resolve_line(line: &str) -> Result<Operation> {
    let ParsedLine { target, args } = parse_line(line);

    let url = match target {
        LineTarget::Help => return Ok(Operation::bare(Mode::Help)),
        LineTarget::Absent if args.iter().any(|a| a == NIGHT_OPS_FLAG) && only_flags(&args) => {
            return Ok(standalone_cleanup(&args));
        }
        LineTarget::Absent => return Err(CoreError::NoUrl),
        LineTarget::Url(url) => url,
    };

    let (search, args) = take_search(args)?;
    let (full, args) = take_flag(args, FULL_FLAG);
    let (schedule, args) = take_schedule(args)?;
    let (night_ops, args) = take_flag(args, NIGHT_OPS_FLAG);

    if schedule.is_some() && !night_ops {
        return Err(CoreError::ScheduleWithoutNightOps);
    }

    let unknown: Vec<String> = args
        .iter()
        .filter(|a| a.starts_with('-') && !is_known_flag(a))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(CoreError::UnknownFlags(unknown));
    }

    if night_ops && schedule.is_none() {
        return Err(CoreError::NightOpsWithoutSchedule);
    }

    let (network, args) = take_flag(args, NETWORK_FLAG);
    if full && network {
        return Err(CoreError::FullWithNetwork);
    }

    let mut operation = if network {
        resolve_network(&args)?
    } else {
        resolve_html(&args, full)?
    };
    operation.target_url = Some(url);
    operation.search = search;
    operation.scheduled_cleanup_secs = schedule;
    Ok(operation)
}

fn standalone_cleanup(args: &[String]) -> Operation {
    let mut operation = Operation::bare(Mode::Cleanup);
    let ignored: Vec<String> = args
        .iter()
        .filter(|a| *a != NIGHT_OPS_FLAG)
        .cloned()
        .collect();
    if !ignored.is_empty() {
        operation.warnings.push(Warning::IgnoredCleanupArgs(ignored));
    }
    operation
}

// Stray words may be a mistyped URL and must not trigger a standalone cleanup.
fn only_flags(args: &[String]) -> bool {
    let mut expecting: Option<&str> = None;
    for token in args {
        if !is_value(token) {
            expecting = [OUTPUT_FLAG, DURATION_FLAG, SEARCH_FLAG, SCHEDULE_FLAG]
                .into_iter()
                .find(|f| *f == token.as_str());
            continue;
        }
        match expecting {
            // -sd accepts several duration fragments.
            Some(SCHEDULE_FLAG) => {}
            Some(_) => expecting = None,
            None => return false,
        }
    }
    true
}

fn take_flag(args: Vec<String>, flag: &str) -> (bool, Vec<String>) {
    let before = args.len();
    let rest: Vec<String> = args.into_iter().filter(|a| a != flag).collect();
    (rest.len() != before, rest)
}

fn is_value(token: &str) -> bool {
    !token.starts_with('-')
}

/// Pull out every `--search <terms>` pair; repeated occurrences are merged.
fn take_search(args: Vec<String>) -> Result<(Option<SearchTerms>, Vec<String>)> {
    let mut values = Vec::new();
    let mut rest = Vec::with_capacity(args.len());
    let mut tokens = args.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if token != SEARCH_FLAG {
            rest.push(token);
            continue;
        }
        match tokens.next_if(|next| is_value(next)) {
            Some(value) => values.push(value),
            None => {
                return Err(CoreError::MissingValue {
                    flag: SEARCH_FLAG,
                    example: "'--search mp4' or '--search mp4,cdn'",
                });
            }
        }
    }

    if values.is_empty() {
        return Ok((None, rest));
    }
    let terms = SearchTerms::parse(&values.join(","))?;
    Ok((Some(terms), rest))
}

fn take_schedule(args: Vec<String>) -> Result<(Option<u64>, Vec<String>)> {
    let Some(index) = args.iter().position(|a| a == SCHEDULE_FLAG) else {
        return Ok((None, args));
    };

    let fragments: Vec<&String> = args[index + 1..]
        .iter()
        .take_while(|a| is_value(a))
        .collect();
    if fragments.is_empty() {
        return Err(CoreError::MissingValue {
            flag: SCHEDULE_FLAG,
            example: "'1h30m', '90s', or '1h 15m 30s'",
        });
    }

    let joined: String = fragments.iter().map(|s| s.as_str()).collect();
    let seconds = parse_duration(&joined).map_err(|_| CoreError::InvalidDuration {
        flag: SCHEDULE_FLAG,
        value: fragments
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    })?;

    let end = index + 1 + fragments.len();
    let rest: Vec<String> = args[..index].iter().chain(&args[end..]).cloned().collect();
    if rest.iter().any(|a| a == SCHEDULE_FLAG) {
        return Err(CoreError::ScheduleRepeated);
    }

    Ok((Some(seconds), rest))
}

fn output_value(tokens: &[String]) -> Result<PathBuf> {
    match tokens.get(1) {
        Some(value) if is_value(value) => Ok(PathBuf::from(value)),
        _ => Err(CoreError::MissingValue {
            flag: OUTPUT_FLAG,
            example: "-o results.txt",
        }),
    }
}

enum HtmlToken {
    Output(PathBuf),
    NoMedia,
    Category(Category),
    Skip,
}

fn html_token(tokens: &[String]) -> Result<(usize, HtmlToken)> {
    let head = tokens[0].as_str();
    if head == OUTPUT_FLAG {
        return Ok((2, HtmlToken::Output(output_value(tokens)?)));
    }
    if head == NO_MEDIA_FLAG {
        return Ok((1, HtmlToken::NoMedia));
    }
    Ok(match html_category_for_flag(head) {
        Some(category) => (1, HtmlToken::Category(category)),
        None => (1, HtmlToken::Skip),
    })
}

fn resolve_html(args: &[String], full: bool) -> Result<Operation> {
    let mut output_path = None;
    let mut no_media = false;
    let mut collected = BTreeSet::new();

    let mut rest = args;
    while !rest.is_empty() {
        let (consumed, token) = html_token(rest)?;
        rest = &rest[consumed..];
        match token {
            HtmlToken::Output(path) => output_path = Some(path),
            HtmlToken::NoMedia => no_media = true,
            HtmlToken::Category(category) => {
                collected.insert(category);
            }
            HtmlToken::Skip => {}
        }
    }

    let mut operation = Operation::bare(if full { Mode::FullDump } else { Mode::HtmlScrape });
    operation.output_path = output_path;
    if !full {
        operation.categories = if no_media {
            CategoryFilter::Exclude(collected)
        } else if collected.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Include(collected)
        };
    }
    Ok(operation)
}

enum NetworkToken {
    Output(PathBuf),
    Window(CaptureWindow),
    Type(NetworkResourceType),
    Skip,
}

fn network_token(tokens: &[String]) -> Result<(usize, NetworkToken)> {
    let head = tokens[0].as_str();
    if head == OUTPUT_FLAG {
        return Ok((2, NetworkToken::Output(output_value(tokens)?)));
    }
    if head == DURATION_FLAG {
        let value = tokens
            .get(1)
            .filter(|v| is_value(v))
            .ok_or(CoreError::MissingValue {
                flag: DURATION_FLAG,
                example: "-t 30, -t 2m or -t 1m30s",
            })?;
        let seconds = parse_duration(value).map_err(|_| CoreError::InvalidDuration {
            flag: DURATION_FLAG,
            value: value.clone(),
        })?;
        return Ok((2, NetworkToken::Window(CaptureWindow::Timed { seconds })));
    }
    if head == LIVE_FLAG {
        return Ok((1, NetworkToken::Window(CaptureWindow::Live)));
    }
    Ok(match network_type_for_flag(head) {
        Some(kind) => (1, NetworkToken::Type(kind)),
        None => (1, NetworkToken::Skip),
    })
}

fn resolve_network(args: &[String]) -> Result<Operation> {
    let mut output_path = None;
    let mut timed = None;
    let mut live = false;
    let mut types = BTreeSet::new();

    let mut rest = args;
    while !rest.is_empty() {
        let (consumed, token) = network_token(rest)?;
        rest = &rest[consumed..];
        match token {
            NetworkToken::Output(path) => output_path = Some(path),
            NetworkToken::Window(CaptureWindow::Live) => live = true,
            NetworkToken::Window(window) => timed = Some(window),
            NetworkToken::Type(kind) => {
                types.insert(kind);
            }
            NetworkToken::Skip => {}
        }
    }

    let capture = match (timed, live) {
        (Some(_), true) => return Err(CoreError::CaptureWindowConflict),
        (Some(window), false) => window,
        (None, true) => CaptureWindow::Live,
        (None, false) => return Err(CoreError::CaptureWindowRequired),
    };

    let ignored: BTreeSet<&String> = args.iter().filter(|a| is_html_only_flag(a)).collect();

    let mut operation = Operation::bare(Mode::NetworkCapture);
    operation.output_path = output_path;
    operation.capture = Some(capture);
    operation.network_types = types;
    if !ignored.is_empty() {
        operation.warnings.push(Warning::IgnoredHtmlFlags(
            ignored.into_iter().cloned().collect(),
        ));
    }
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn take_flag_removes_all_occurrences() {
        let (present, rest) = take_flag(tokens("-n -s -n"), "-n");
        assert!(present);
        assert_eq!(rest, ["-s"]);
    }

    #[test]
    fn take_schedule_joins_fragments() {
        let (secs, rest) = take_schedule(tokens("-s -sd 1h 15m 30s -md")).unwrap();
        assert_eq!(secs, Some(4530));
        assert_eq!(rest, ["-s", "-md"]);
    }

    #[test]
    fn take_search_merges_repeats() {
        let (terms, rest) = take_search(tokens("--search mp4 -s --search CDN")).unwrap();
        assert_eq!(terms.unwrap().terms(), ["mp4", "cdn"]);
        assert_eq!(rest, ["-s"]);
    }

    #[test]
    fn html_token_consumes_output_pair() {
        let args = tokens("-o out.txt -s");
        let (consumed, token) = html_token(&args).unwrap();
        assert_eq!(consumed, 2);
        assert!(matches!(token, HtmlToken::Output(p) if p == Path::new("out.txt")));
    }

    #[test]
    fn network_token_parses_duration() {
        let args = tokens("-t 1m30s");
        let (consumed, token) = network_token(&args).unwrap();
        assert_eq!(consumed, 2);
        assert!(matches!(
            token,
            NetworkToken::Window(CaptureWindow::Timed { seconds: 90 })
        ));
    }
}
