//! Diagnostic logging setup
//!
//! Installs a `tracing` subscriber. CLI commands log to stderr; while the
//! TUI owns the terminal, logs go to `expense.log` in the data directory.
//! `RUST_LOG` takes precedence over the default level.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{ExpenseError, ExpenseResult};

/// Where diagnostic output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,expense_cli=debug,expense=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber
pub fn init(verbose: bool, target: LogTarget) -> ExpenseResult<()> {
    let filter = if verbose {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| ExpenseError::Io(format!("Failed to open log file: {}", e)))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| ExpenseError::Config(format!("Failed to initialise logging: {}", e)))
}
