use kno_url_core::CoreError;
use kno_url_scanner::ScanError;
use thiserror::Error;

/// Why a single interactive command was abandoned. The session continues.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error(transparent)]
    Transport(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, CommandError>;
