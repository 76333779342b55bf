// Live network capture through a headless Chromium session

use crate::error::{Result, ScanError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{EnableParams, EventRequestWillBeSent};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const CHROMIUM_PATH_ENV: &str = "KNO_URL_CHROMIUM_PATH";
pub const BROWSERS_PATH_ENV: &str = "KNO_URL_BROWSERS_PATH";
const MANAGED_BROWSERS_DIR: &str = "kno-url-browsers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    /// Lower-cased resource type, e.g. `xhr`, `script`, `websocket`.
    pub kind: String,
    pub url: String,
}

pub type EventCallback = Arc<dyn Fn(CaptureEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Elapsed,
    Interrupted,
}

#[async_trait]
pub trait Capturer: Send + Sync {
    /// Whether the browser this capturer drives is installed.
    fn dependency_present(&self) -> bool;

    /// Load `url` and report requests until `window` elapses, or until
    /// Ctrl+C when `window` is `None`. Ctrl+C also ends a timed capture early.
    async fn capture(
        &self,
        url: &str,
        window: Option<Duration>,
        on_event: EventCallback,
    ) -> Result<StopReason>;
}

pub fn managed_browsers_dir() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(BROWSERS_PATH_ENV) {
        if !p.is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    dirs::cache_dir().map(|cache| cache.join(MANAGED_BROWSERS_DIR))
}

fn managed_candidates(dir: &Path) -> Vec<PathBuf> {
    if cfg!(target_os = "macos") {
        vec![
            dir.join("chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
            dir.join("chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
            dir.join("chrome"),
        ]
    } else if cfg!(target_os = "windows") {
        vec![dir.join("chrome-win64/chrome.exe"), dir.join("chrome.exe")]
    } else {
        vec![dir.join("chrome-linux64/chrome"), dir.join("chrome")]
    }
}

/// Find a Chromium executable.
///
/// Order: `explicit`, `KNO_URL_CHROMIUM_PATH`, the managed bundle directory,
/// then `google-chrome`, `chromium` and `chromium-browser` on `PATH`.
pub fn find_chromium(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!("Configured browser {} does not exist", path.display());
    }

    if let Ok(p) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(dir) = managed_browsers_dir() {
        if let Some(found) = managed_candidates(&dir).into_iter().find(|c| c.exists()) {
            return Some(found);
        }
    }

    ["google-chrome", "chromium", "chromium-browser"]
        .into_iter()
        .find_map(|name| which::which(name).ok())
}

pub struct BrowserCapture {
    chromium: Option<PathBuf>,
}

impl BrowserCapture {
    pub fn new() -> Self {
        Self { chromium: None }
    }

    pub fn with_chromium(mut self, path: PathBuf) -> Self {
        self.chromium = Some(path);
        self
    }

    async fn watch_page(
        page: &Page,
        url: &str,
        window: Option<Duration>,
        on_event: EventCallback,
    ) -> Result<StopReason> {
        page.execute(EnableParams::default()).await?;
        let mut requests = page.event_listener::<EventRequestWillBeSent>().await?;

        let listener = tokio::spawn(async move {
            while let Some(event) = requests.next().await {
                // Variant names lower-case to the labels the classifier
                // expects: Xhr -> xhr, WebSocket -> websocket.
                let kind = event
                    .r#type
                    .as_ref()
                    .map(|t| format!("{t:?}").to_lowercase())
                    .unwrap_or_default();
                on_event(CaptureEvent {
                    kind,
                    url: event.request.url.clone(),
                });
            }
        });

        let observe = async {
            page.goto(url).await?;
            debug!("Navigation to {} finished", url);
            match window {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending::<()>().await,
            }
            Ok::<_, ScanError>(StopReason::Elapsed)
        };

        let outcome = tokio::select! {
            result = observe => result,
            _ = tokio::signal::ctrl_c() => Ok(StopReason::Interrupted),
        };

        listener.abort();
        outcome
    }
}

impl Default for BrowserCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Capturer for BrowserCapture {
    fn dependency_present(&self) -> bool {
        find_chromium(self.chromium.as_deref()).is_some()
    }

    async fn capture(
        &self,
        url: &str,
        window: Option<Duration>,
        on_event: EventCallback,
    ) -> Result<StopReason> {
        let executable = find_chromium(self.chromium.as_deref()).ok_or(ScanError::BrowserNotFound)?;
        info!("Launching {} for capture of {}", executable.display(), url);

        let config = BrowserConfig::builder()
            .chrome_executable(executable)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--ignore-certificate-errors")
            .build()
            .map_err(ScanError::BrowserConfig)?;

        let (mut browser, mut handler) = Browser::launch(config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
        });

        let outcome = match browser.new_page("about:blank").await {
            Ok(page) => Self::watch_page(&page, url, window, on_event).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = browser.close().await {
            debug!("Browser close failed: {}", e);
        }
        if let Err(e) = browser.wait().await {
            debug!("Waiting for browser exit failed: {}", e);
        }
        handler_task.abort();

        outcome
    }
}
