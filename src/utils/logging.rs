//! Diagnostic logging setup.
//!
//! The chat UI owns the terminal, so it only gets a log writer when a file is
//! given. One-shot commands log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "code_companion=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Write to stderr (non-interactive commands).
    Stderr,
    /// Discard output unless a file is given (full-screen UI).
    Quiet,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. `log_file` wins over `target`.
pub fn init_tracing(
    log_file: Option<&Path>,
    target: LogTarget,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = log_file {
        // Test if we can create/write to the file before the UI takes over
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|err| -> Box<dyn std::error::Error> { err })?;
        return Ok(());
    }

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .without_time()
                .try_init()
                .map_err(|err| -> Box<dyn std::error::Error> { err })?;
        }
        LogTarget::Quiet => {}
    }
    Ok(())
}
