#![forbid(unsafe_code)]

//! Entry point: CLI parsing, logging setup, fetch spawn, event loop.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use udeck_fetch::{DEFAULT_ENDPOINT, Fetcher};
use userdeck::app::{App, run};
use userdeck::terminal::{SessionOptions, TerminalSession};

/// Terminal dashboard for browsing, filtering, and revealing user records.
#[derive(Debug, Parser)]
#[command(name = "userdeck", version, about)]
struct Args {
    /// Record endpoint (falls back to USERDECK_URL, then the default).
    #[arg(long)]
    url: Option<String>,

    /// HTTP timeout for the startup fetch, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Write tracing output to this file (USERDECK_LOG sets the filter).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Idle tick interval for the event loop, in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let Some(path) = log_file else {
        // No sink configured: events are discarded and the screen stays
        // clean for the TUI.
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("USERDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn resolve_url(args: &Args) -> String {
    args.url
        .clone()
        .or_else(|| std::env::var("USERDECK_URL").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let url = resolve_url(&args);
    let timeout = Duration::from_secs(args.timeout_secs);

    // The one-shot fetch: spawned once, resolves once, never re-triggered.
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("userdeck-fetch".to_string())
        .spawn(move || {
            let result = Fetcher::new(url, timeout).and_then(|fetcher| fetcher.fetch());
            let _ = tx.send(result);
        })?;

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: true,
    })?;

    let mut app = App::new();
    let result = run(&mut app, &session, &rx, Duration::from_millis(args.tick_ms));

    // Restore the terminal before any error surfaces on stderr.
    drop(session);
    result
}
