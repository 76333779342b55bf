// Command parsing, URL categorization and report formatting for kno-url

pub mod classify;
pub mod duration;
pub mod error;
pub mod flags;
pub mod input;
pub mod marker;
pub mod options;
pub mod report;
pub mod search;

pub use classify::{Category, NetworkResourceType, classify_html, classify_network};
pub use duration::parse_duration;
pub use error::{CoreError, Result};
pub use input::{LineTarget, ParsedLine, normalize_url_candidate, parse_line};
pub use marker::TrackingMarker;
pub use options::{CaptureWindow, CategoryFilter, Mode, Operation, Warning, resolve_line};
pub use report::{CaptureCollector, Report, ReportKey, group_html};
pub use search::{SearchTerms, matches_search};
