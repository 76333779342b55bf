use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP error fetching {url}: {status} {reason}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(
        "No Chromium-based browser found. Install Google Chrome or Chromium, \
         or point KNO_URL_CHROMIUM_PATH at the executable."
    )]
    BrowserNotFound,

    #[error("Browser configuration error: {0}")]
    BrowserConfig(String),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
