pub mod config;
pub mod dashboard;
pub mod error;
pub mod hits;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Log file used by the interactive dashboard when none is configured
pub const DEFAULT_TUI_LOG_FILE: &str = "hitdash.log";

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to
/// stderr unless a file is configured; the interactive dashboard always
/// logs to a file so output does not tear the terminal UI.
///
/// Note: This function can only be called once.
pub fn init_tracing(logging: &LoggingConfig, interactive: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let log_file = logging
        .file
        .clone()
        .or_else(|| interactive.then(|| PathBuf::from(DEFAULT_TUI_LOG_FILE)));

    let writer = match &log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()?,
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(log_file.is_none())
                    .with_writer(writer),
            )
            .try_init()?,
    }

    Ok(())
}
