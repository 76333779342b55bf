// The --night-ops cleanup executor. Every step is best effort.

use crate::config::{Config, history_file, user_state_dir};
use crate::output;
use kno_url_core::TrackingMarker;
use kno_url_scanner::capture::managed_browsers_dir;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIRM_PROMPT: &str = "[!] --night-ops will attempt to delete this executable and local cache directories. Proceed? [y/N]:";

/// Locations removed by a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Local state directory holding the tracking marker.
    pub state_dir: PathBuf,
    pub user_state_dir: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    /// Browser bundle managed by this tool.
    pub browsers_dir: Option<PathBuf>,
    /// The running executable.
    pub executable: Option<PathBuf>,
}

/// What a cleanup run managed to do.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl CleanupPlan {
    /// Everything this process has left behind.
    pub fn for_process(config: &Config) -> Self {
        Self {
            state_dir: config.state_dir.clone(),
            user_state_dir: user_state_dir(),
            history_file: history_file(),
            browsers_dir: managed_browsers_dir(),
            executable: std::env::current_exe().ok(),
        }
    }

    pub fn run(&self, marker: &TrackingMarker) -> CleanupOutcome {
        let mut outcome = CleanupOutcome::default();
        output::info("--night-ops: attempting local cleanup of tool artifacts...");

        self.remove_browsers_if_installed_after(marker, &mut outcome);

        if let Err(e) = marker.clear() {
            output::warn(format!("Failed to clear tracking marker: {e}"));
        }

        let dirs = std::iter::once(&self.state_dir).chain(self.user_state_dir.as_ref());
        for dir in dirs {
            if !dir.is_dir() {
                continue;
            }
            match fs::remove_dir_all(dir) {
                Ok(()) => {
                    output::info(format!("Removed cache directory {}", dir.display()));
                    outcome.removed.push(dir.clone());
                }
                Err(e) => {
                    output::warn(format!(
                        "Failed to remove cache directory ({}): {e}",
                        dir.display()
                    ));
                    outcome.failed.push(dir.clone());
                }
            }
        }

        if let Some(history) = self.history_file.as_deref().filter(|p| p.is_file()) {
            match fs::remove_file(history) {
                Ok(()) => {
                    output::info(format!("Removed history file {}", history.display()));
                    outcome.removed.push(history.to_path_buf());
                }
                Err(e) => {
                    output::warn(format!(
                        "Failed to remove history file {}: {e}",
                        history.display()
                    ));
                    outcome.failed.push(history.to_path_buf());
                }
            }
        }

        if let Some(executable) = &self.executable {
            remove_executable(executable, &mut outcome);
        }

        output::info("--night-ops: local cleanup complete (best effort).");
        outcome
    }

    fn remove_browsers_if_installed_after(
        &self,
        marker: &TrackingMarker,
        outcome: &mut CleanupOutcome,
    ) {
        // Only a browser that was missing when first needed is ours to remove.
        if marker.was_preexisting() != Some(false) {
            debug!("Browser bundle predates kno-url or was never tracked; keeping it");
            return;
        }
        let Some(dir) = self.browsers_dir.as_deref().filter(|d| d.is_dir()) else {
            return;
        };

        output::info(
            "Detected a browser bundle installed after first valid network-mode use; attempting cleanup...",
        );
        match fs::remove_dir_all(dir) {
            Ok(()) => {
                output::info(format!("Removed browser bundle at {}", dir.display()));
                outcome.removed.push(dir.to_path_buf());
            }
            Err(e) => {
                output::warn(format!(
                    "Failed to remove browser bundle at {}: {e}",
                    dir.display()
                ));
                outcome.failed.push(dir.to_path_buf());
            }
        }
    }
}

fn remove_executable(path: &Path, outcome: &mut CleanupOutcome) {
    match fs::remove_file(path) {
        Ok(()) => {
            output::info(format!("Removed executable {}", path.display()));
            outcome.removed.push(path.to_path_buf());
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            output::warn(format!(
                "Could not delete executable (possibly locked by OS): {}",
                path.display()
            ));
            outcome.failed.push(path.to_path_buf());
        }
        Err(e) => {
            output::warn(format!(
                "Failed to delete executable {}: {e}",
                path.display()
            ));
            outcome.failed.push(path.to_path_buf());
        }
    }
}
