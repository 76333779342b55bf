pub mod capture;
pub mod error;
pub mod extract;
pub mod fetcher;

pub use capture::{BrowserCapture, CaptureEvent, Capturer, EventCallback, StopReason};
pub use error::ScanError;
pub use extract::{contains_blob, extract_urls};
pub use fetcher::{Fetcher, HttpFetcher};
