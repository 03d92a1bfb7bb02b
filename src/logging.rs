//! Tracing configuration and log routing.
//!
//! Two entry points exist: [`init_tracing`] for the HTTP server and [`init_cli_tracing`] for the
//! one-shot `summarize-pdf` tool. The server logs compactly to stdout and to an append-only file
//! (`PDF_SUMMARY_LOG_FILE`, or `logs/pdf-summary.log` when unset) through a non-blocking
//! writer. The CLI writes to stderr only so that stdout carries nothing but the summary.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILE: &str = "pdf-summary.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Configure tracing for the server: `RUST_LOG` filtering (default `info`), compact stdout,
/// and a file layer when the log destination can be opened.
pub fn init_tracing() {
    let stdout_layer = fmt::layer().with_target(false).compact();
    let registry = tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stdout_layer);

    match open_file_writer(&log_file_path()) {
        Some(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

/// Configure tracing for the command line tool. Logs go to stderr; `verbose` lowers the
/// default level from `warn` to `debug`.
pub fn init_cli_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Resolve the log destination from `PDF_SUMMARY_LOG_FILE`, falling back to `logs/`.
pub(crate) fn log_file_path() -> PathBuf {
    std::env::var("PDF_SUMMARY_LOG_FILE")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(DEFAULT_LOG_DIR).join(DEFAULT_LOG_FILE))
}

/// Open `path` for appending behind a non-blocking writer, creating parent directories.
///
/// Returns `None` (after reporting on stderr) when the file cannot be opened; the server keeps
/// running with stdout logging only.
fn open_file_writer(path: &Path) -> Option<NonBlocking> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {}: {err}", parent.display());
            return None;
        }
    }

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(non_blocking)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}
