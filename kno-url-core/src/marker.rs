// Per-directory record of whether the capture browser existed before first use

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const PREEXISTING_MARKER: &str = "browser_preexisting.flag";
pub const MISSING_MARKER: &str = "browser_missing_at_start.flag";

/// Init-once, read-many, delete-once marker kept in a state directory.
#[derive(Debug, Clone)]
pub struct TrackingMarker {
    state_dir: PathBuf,
}

impl TrackingMarker {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn preexisting_path(&self) -> PathBuf {
        self.state_dir.join(PREEXISTING_MARKER)
    }

    fn missing_path(&self) -> PathBuf {
        self.state_dir.join(MISSING_MARKER)
    }

    /// Record `dependency_present` unless a marker already exists.
    ///
    /// Returns `true` when this call wrote the marker. The first writer wins;
    /// an existing marker is never overwritten.
    pub fn initialize_if_absent(&self, dependency_present: bool) -> Result<bool> {
        if self.was_preexisting().is_some() {
            return Ok(false);
        }

        fs::create_dir_all(&self.state_dir)?;

        let path = if dependency_present {
            self.preexisting_path()
        } else {
            self.missing_path()
        };

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// `Some(true)` if the dependency pre-existed, `Some(false)` if it was
    /// missing at start, `None` if nothing was recorded yet.
    pub fn was_preexisting(&self) -> Option<bool> {
        if self.preexisting_path().is_file() {
            Some(true)
        } else if self.missing_path().is_file() {
            Some(false)
        } else {
            None
        }
    }

    pub fn clear(&self) -> Result<()> {
        for path in [self.preexisting_path(), self.missing_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
