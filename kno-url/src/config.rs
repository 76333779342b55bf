use crate::commands::DEFAULT_STATE_DIR;
use clap::ArgMatches;
use std::path::PathBuf;

pub const HISTORY_FILE: &str = ".kno_url_history";
pub const USER_STATE_DIR: &str = ".kno-url";

/// Process-level settings, fixed for the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quiet: bool,
    pub verbose: bool,
    pub command: Option<String>,
    pub state_dir: PathBuf,
    pub timeout_secs: u64,
    pub chromium: Option<PathBuf>,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let state_dir = matches
            .get_one::<String>("state-dir")
            .map(String::as_str)
            .unwrap_or(DEFAULT_STATE_DIR);

        Self {
            quiet: matches.get_flag("quiet"),
            verbose: matches.get_flag("verbose"),
            command: matches.get_one::<String>("command").cloned(),
            state_dir: PathBuf::from(shellexpand::tilde(state_dir).as_ref()),
            timeout_secs: matches.get_one::<u64>("timeout").copied().unwrap_or(20),
            chromium: matches.get_one::<PathBuf>("chromium").cloned(),
        }
    }
}

/// `~/.kno_url_history`
pub fn history_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(HISTORY_FILE))
}

/// `~/.kno-url`
pub fn user_state_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_STATE_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command_argument_builder;

    fn parse(args: &[&str]) -> Config {
        let matches = command_argument_builder()
            .try_get_matches_from(args)
            .unwrap();
        Config::from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["kno-url"]);
        assert!(!config.quiet);
        assert!(!config.verbose);
        assert_eq!(config.command, None);
        assert_eq!(config.state_dir, PathBuf::from("./.kno-url"));
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.chromium, None);
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "kno-url",
            "-q",
            "-v",
            "-c",
            "cnn.com -a",
            "--state-dir",
            "/tmp/kno",
            "--timeout",
            "5",
            "--chromium",
            "/usr/bin/chromium",
        ]);
        assert!(config.quiet);
        assert!(config.verbose);
        assert_eq!(config.command.as_deref(), Some("cnn.com -a"));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/kno"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.chromium, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_state_dir_tilde_expanded() {
        let config = parse(&["kno-url", "--state-dir", "~/kno-state"]);
        assert!(!config.state_dir.starts_with("~"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(
            command_argument_builder()
                .try_get_matches_from(["kno-url", "--timeout", "0"])
                .is_err()
        );
    }
}
