//! Tracing setup for the drivers.

use std::fs::File;
use std::io;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, Mode};

/// Where log lines end up for a given driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
    Disabled,
}

/// The TUI owns the terminal, so it only logs when a file is configured.
pub fn target_for(config: &LogConfig, mode: Mode) -> LogTarget {
    match (&config.file, mode) {
        (Some(_), _) => LogTarget::File,
        (None, Mode::Plain) => LogTarget::Stderr,
        (None, Mode::Tui) => LogTarget::Disabled,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured filter. Safe to call more than once.
pub fn init(config: &LogConfig, mode: Mode) -> io::Result<LogTarget> {
    let target = target_for(config, mode);
    let writer = match (target, &config.file) {
        (LogTarget::File, Some(path)) => BoxMakeWriter::new(Arc::new(File::create(path)?)),
        (LogTarget::Stderr, _) => BoxMakeWriter::new(io::stderr),
        _ => return Ok(LogTarget::Disabled),
    };

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(config, rust_log.as_deref());

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(target == LogTarget::Stderr)
        .with_target(true)
        .try_init();

    // Another subscriber already owns the process; ours would never see events.
    match installed {
        Ok(()) => Ok(target),
        Err(_) => Ok(LogTarget::Disabled),
    }
}

/// A valid `RUST_LOG` value wins over the configured filter.
pub fn filter_for(config: &LogConfig, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.filter))
}
