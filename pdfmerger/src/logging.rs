//! Logging setup.
//!
//! The library emits `tracing` events; binaries call [`init`] once to route
//! them to an append-only log file and, optionally, stderr. A log file that
//! cannot be opened or written is ignored: logging never fails an operation.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "PDFMERGER_LOG";

/// Timestamp format of log lines.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Filter from [`LOG_ENV_VAR`], else the configured default directive.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive))
}

/// Open `path` for appending, creating it and its directory as needed.
pub fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = std::fs::create_dir_all(parent);
    }

    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Build the subscriber described by `config` without installing it.
pub fn subscriber(config: &LogConfig) -> impl tracing::Subscriber + Send + Sync + 'static {
    let file_layer = config
        .file
        .as_deref()
        .and_then(open_log_file)
        .map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        });

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
    });

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(file_layer)
        .with(stderr_layer)
}

/// Install the global subscriber.
///
/// Returns `false` if one was already installed.
pub fn init(config: &LogConfig) -> bool {
    subscriber(config).try_init().is_ok()
}
