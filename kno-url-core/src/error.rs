use thiserror::Error;

/// Rejections raised while turning an input line into an [`Operation`].
///
/// Every variant except `Io` is a user input problem: it aborts the current
/// command only and is raised before any fetch or capture starts.
///
/// [`Operation`]: crate::options::Operation
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No URL detected. Use -h or --help for usage, or use '--night-ops' alone for cleanup.")]
    NoUrl,

    #[error("{flag} requires a value, e.g. {example}")]
    MissingValue {
        flag: &'static str,
        example: &'static str,
    },

    #[error("invalid {flag} duration: {value:?}")]
    InvalidDuration { flag: &'static str, value: String },

    #[error("Malformed duration: {0:?}")]
    MalformedDuration(String),

    #[error("--search requires at least one non-empty term.")]
    EmptySearch,

    #[error("Unknown flag(s): {}. Try -h to see the full flag list.", .0.join(" "))]
    UnknownFlags(Vec<String>),

    #[error("-sd can only be used together with --night-ops.")]
    ScheduleWithoutNightOps,

    #[error(
        "--night-ops can't be ran along side other commands unless -sd is defined with a time to execute"
    )]
    NightOpsWithoutSchedule,

    #[error("-sd specified multiple times.")]
    ScheduleRepeated,

    #[error("--full is only supported in HTML mode and can't be combined with -n.")]
    FullWithNetwork,

    #[error("Network mode (-n) requires either -t <duration> or --live.")]
    CaptureWindowRequired,

    #[error("Network mode accepts only one of -t <duration> or --live, not both.")]
    CaptureWindowConflict,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
