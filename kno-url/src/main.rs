use anyhow::{Context, Result};
use kno_url::commands::command_argument_builder;
use kno_url::config::history_file;
use kno_url::help::print_banner;
use kno_url::{CleanupPlan, Config, Flow, Session, output};
use kno_url_core::TrackingMarker;
use kno_url_scanner::{BrowserCapture, Capturer, Fetcher, HttpFetcher};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "Main URL: ";

#[tokio::main]
async fn main() -> Result<()> {
    let matches = command_argument_builder().get_matches();
    let config = Config::from_matches(&matches);

    init_tracing(config.verbose);

    if !config.quiet {
        print_banner();
    }

    let fetcher =
        HttpFetcher::with_timeout(config.timeout_secs).context("failed to build HTTP client")?;
    let capturer = match &config.chromium {
        Some(path) => BrowserCapture::new().with_chromium(path.clone()),
        None => BrowserCapture::new(),
    };
    let session = Session::new(
        fetcher,
        capturer,
        TrackingMarker::new(&config.state_dir),
        CleanupPlan::for_process(&config),
    );

    match &config.command {
        Some(line) => run_once(&session, line).await,
        None => run_repl(&session).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_once<F: Fetcher, C: Capturer>(session: &Session<F, C>, line: &str) -> Result<()> {
    if let Err(e) = session.handle_line(line).await {
        output::error(&e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_repl<F: Fetcher, C: Capturer>(session: &Session<F, C>) -> Result<()> {
    let mut rl = DefaultEditor::new().context("failed to start line editor")?;

    let history = history_file();
    if let Some(path) = &history {
        if let Err(e) = rl.load_history(path) {
            debug!("No history loaded from {}: {}", path.display(), e);
        }
    }

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e).context("failed to read input"),
        };

        let line = line.trim();
        if !line.is_empty() {
            let _ = rl.add_history_entry(line);
            // Saved before the command runs so a cleanup can remove it.
            if let Some(path) = &history {
                if let Err(e) = rl.save_history(path) {
                    debug!("Could not save history to {}: {}", path.display(), e);
                }
            }
        }

        match session.handle_line(line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => output::error(&e),
        }
    }

    Ok(())
}
