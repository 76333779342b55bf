// Dispatching resolved operations to the fetch and capture collaborators

use crate::cleanup::{CONFIRM_PROMPT, CleanupPlan};
use crate::error::Result;
use crate::help::print_help;
use crate::output;
use colored::Colorize;
use futures::FutureExt;
use futures::future::BoxFuture;
use indicatif::{ProgressBar, ProgressStyle};
use kno_url_core::report::{CaptureCollector, Report, ReportKey, group_html};
use kno_url_core::{CoreError, Mode, Operation, TrackingMarker, resolve_line};
use kno_url_scanner::{
    CaptureEvent, Capturer, EventCallback, Fetcher, StopReason, contains_blob, extract_urls,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

pub type ConfirmCallback = Arc<dyn Fn(&str) -> bool + Send + Sync>;
pub type InterruptCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// What the REPL should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Cleanup ran; the process should exit.
    Exit,
}

/// Read a y/N answer on the terminal.
pub fn stdin_confirm(prompt: &str) -> bool {
    let answer = DefaultEditor::new().and_then(|mut rl| rl.readline(&format!("{prompt} ")));
    confirms(answer)
}

/// Only `y` or `yes` confirm. Ctrl+C, Ctrl+D and read errors cancel.
pub fn confirms(answer: std::result::Result<String, ReadlineError>) -> bool {
    match answer {
        Ok(line) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!();
            false
        }
        Err(e) => {
            debug!("Confirmation prompt failed: {}", e);
            false
        }
    }
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
pub fn ctrl_c_interrupt() -> BoxFuture<'static, ()> {
    async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
    .boxed()
}

pub struct Session<F, C> {
    fetcher: F,
    capturer: C,
    marker: TrackingMarker,
    cleanup: CleanupPlan,
    confirm: ConfirmCallback,
    interrupt: InterruptCallback,
}

impl<F: Fetcher, C: Capturer> Session<F, C> {
    pub fn new(fetcher: F, capturer: C, marker: TrackingMarker, cleanup: CleanupPlan) -> Self {
        Self {
            fetcher,
            capturer,
            marker,
            cleanup,
            confirm: Arc::new(stdin_confirm),
            interrupt: Arc::new(ctrl_c_interrupt),
        }
    }

    pub fn with_confirm(mut self, confirm: ConfirmCallback) -> Self {
        self.confirm = confirm;
        self
    }

    /// Replace the Ctrl+C listener used while a scheduled cleanup waits.
    pub fn with_interrupt(mut self, interrupt: InterruptCallback) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn marker(&self) -> &TrackingMarker {
        &self.marker
    }

    /// Rejected lines never reach a collaborator.
    pub async fn handle_line(&self, line: &str) -> Result<Flow> {
        let operation = resolve_line(line)?;

        for warning in operation.warnings() {
            output::warn(warning);
        }

        match operation.mode() {
            Mode::Help => {
                print_help();
                return Ok(Flow::Continue);
            }
            Mode::Cleanup => return Ok(self.confirm_and_clean()),
            _ => {}
        }

        let Some(url) = operation.target_url() else {
            return Err(CoreError::NoUrl.into());
        };

        let result = match operation.mode() {
            Mode::FullDump => self.full_dump(&operation, url).await,
            Mode::NetworkCapture => self.network_capture(&operation, url).await,
            _ => self.html_scrape(&operation, url).await,
        };

        match operation.scheduled_cleanup_secs() {
            Some(delay) => {
                // The cleanup is scheduled regardless of how the command went.
                if let Err(e) = &result {
                    output::error(e);
                }
                Ok(self.scheduled_cleanup(delay).await)
            }
            None => result.map(|()| Flow::Continue),
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        output::info(format!("Fetching HTML from {url} ..."));

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(url.to_string());

        let fetched = self.fetcher.fetch(url).await;
        spinner.finish_and_clear();
        Ok(fetched?)
    }

    async fn html_scrape(&self, operation: &Operation, url: &str) -> Result<()> {
        let page = self.fetch_page(url).await?;
        let urls = extract_urls(&page, url);
        debug!("Extracted {} candidate URLs from {}", urls.len(), url);

        let report = group_html(urls.iter().map(String::as_str), operation);
        present(&report, operation.output_path());

        if contains_blob(&urls) {
            println!();
            output::warn("Detected blob: URLs in the HTML.");
            println!("    Consider using network mode (-n) to see beyond blob: URLs.");
            println!("    Hint: use -h or --help for network mode options.");
        }
        Ok(())
    }

    async fn full_dump(&self, operation: &Operation, url: &str) -> Result<()> {
        let page = self.fetch_page(url).await?;

        if let Some(path) = operation.output_path() {
            match fs::write(path, &page) {
                Ok(()) => output::info(format!("Full HTML written to {}", path.display())),
                Err(e) => output::error(format!(
                    "Failed to write full HTML to {}: {e}",
                    path.display()
                )),
            }
        }
        println!("{page}");
        Ok(())
    }

    async fn network_capture(&self, operation: &Operation, url: &str) -> Result<()> {
        match self
            .marker
            .initialize_if_absent(self.capturer.dependency_present())
        {
            Ok(true) => debug!(
                "Recorded browser state in {}",
                self.marker.state_dir().display()
            ),
            Ok(false) => {}
            Err(e) => warn!("Could not record browser state: {}", e),
        }

        output::info(format!("Starting network capture for {url}"));
        let live = operation.is_live();
        match operation.capture_duration_secs() {
            Some(seconds) => output::info(format!("Capture duration: {seconds} seconds")),
            None => output::info("Live mode: press Ctrl+C to stop."),
        }

        let collector = Arc::new(Mutex::new(CaptureCollector::new(operation)));
        let sink = collector.clone();
        let on_event: EventCallback = Arc::new(move |event: CaptureEvent| {
            let mut collector = match sink.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(kind) = collector.record(&event.kind, &event.url) {
                if live {
                    println!("[{}] {}", kind.label().cyan(), event.url);
                }
            }
        });

        let window = operation.capture_duration_secs().map(Duration::from_secs);
        let reason = self.capturer.capture(url, window, on_event).await?;

        if reason == StopReason::Interrupted {
            println!();
            if live {
                output::info("Live capture stopped by user.");
            } else {
                output::info("Capture interrupted; reporting what was seen so far.");
            }
        }

        let report = match collector.lock() {
            Ok(guard) => guard.report().clone(),
            Err(poisoned) => poisoned.into_inner().report().clone(),
        };
        present(&report, operation.output_path());
        Ok(())
    }

    fn confirm_and_clean(&self) -> Flow {
        if !(self.confirm)(CONFIRM_PROMPT) {
            output::info("--night-ops canceled; no cleanup performed.");
            return Flow::Continue;
        }
        self.clean_and_exit()
    }

    async fn scheduled_cleanup(&self, delay: u64) -> Flow {
        output::info(format!(
            "--night-ops scheduled via -sd, sleeping for {delay} seconds before cleanup..."
        ));

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(delay)) => {}
            _ = (self.interrupt)() => {
                println!();
                output::warn("Sleep interrupted; cleanup aborted.");
                return Flow::Continue;
            }
        }

        self.clean_and_exit()
    }

    fn clean_and_exit(&self) -> Flow {
        let outcome = self.cleanup.run(&self.marker);
        debug!(
            "Cleanup removed {} paths, {} failures",
            outcome.removed.len(),
            outcome.failed.len()
        );
        output::success("Self-destruct complete. Exiting.");
        Flow::Exit
    }
}

fn present<K: ReportKey>(report: &Report<K>, output_path: Option<&Path>) {
    let text = report.render();
    if text.is_empty() {
        output::info(K::NO_MATCHES);
    } else {
        println!("{text}");
    }

    if let Some(path) = output_path {
        match fs::write(path, format!("{text}\n")) {
            Ok(()) => output::info(format!("Results written to {}", path.display())),
            Err(e) => output::error(format!("Failed to write to {}: {e}", path.display())),
        }
    }
}
