//! Configuration for pdfmerger.
//!
//! [`Config`] gathers everything a front end decides before a merge runs:
//! where the output goes, how unqualified output names are synthesized,
//! whether the result is compressed and where the log file lives.

use std::path::PathBuf;

use crate::error::{PdfMergerError, Result};

/// Base name used for synthesized output files (`Merged_1.pdf`, ...).
pub const DEFAULT_BASE_NAME: &str = "Merged";

/// Extension of every file this crate writes.
pub const PDF_EXTENSION: &str = "pdf";

/// Default log file name, created next to the executable.
pub const DEFAULT_LOG_FILE_NAME: &str = "pdfmerger.log";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Append-only log file. `None` disables file logging.
    pub file: Option<PathBuf>,

    /// Mirror log events to stderr.
    pub stderr: bool,

    /// Default filter directive when `PDFMERGER_LOG` is not set.
    pub default_directive: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            stderr: false,
            default_directive: "pdfmerger=info".to_string(),
        }
    }
}

impl LogConfig {
    /// Logging that writes nowhere. Used by tests and embedding callers.
    pub fn disabled() -> Self {
        Self {
            file: None,
            stderr: false,
            default_directive: "off".to_string(),
        }
    }
}

/// Location of the log file next to the running executable.
fn default_log_file() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_LOG_FILE_NAME)))
}

/// Complete configuration for a merge.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit output path. When `None` a unique path is synthesized.
    pub output: Option<PathBuf>,

    /// Directory for synthesized output paths. Falls back to the desktop.
    pub output_dir: Option<PathBuf>,

    /// Base name for synthesized output paths.
    pub base_name: String,

    /// Compress streams of the merged document.
    pub compress: bool,

    /// Logging settings.
    pub log: LogConfig,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: None,
            output_dir: None,
            base_name: DEFAULT_BASE_NAME.to_string(),
            compress: true,
            log: LogConfig::default(),
            quiet: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The base name is empty or contains a path separator
    /// - The explicit output path is empty
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfMergerError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        let base_name = self.base_name.trim();
        if base_name.is_empty() {
            return Err(PdfMergerError::invalid_config(
                "Output base name cannot be empty",
            ));
        }

        if base_name.contains(['/', '\\']) {
            return Err(PdfMergerError::invalid_config(format!(
                "Output base name cannot contain path separators: {base_name}"
            )));
        }

        if let Some(output) = &self.output
            && output.as_os_str().is_empty()
        {
            return Err(PdfMergerError::invalid_config("Output path cannot be empty"));
        }

        Ok(())
    }
}
