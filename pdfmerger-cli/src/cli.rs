//! CLI argument parsing for pdfmerger.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! must not depend on anything beyond `clap` and the library.

use clap::Parser;
use std::path::PathBuf;

use pdfmerger::config::{Config, LogConfig};
use pdfmerger::error::{PdfMergerError, Result};
use pdfmerger::utils::collect_paths_for_patterns;

/// Merge PDF files into a single document.
///
/// Files are merged in the order given. Use --list-pages to print the page
/// order of the inputs as JSON, edit it, and pass it back with --order to
/// reorder or drop individual pages.
#[derive(Parser, Debug)]
#[command(name = "pdfmerger")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Glob patterns are expanded; matches are sorted by name.
    ///
    /// Examples:
    ///   pdfmerger a.pdf b.pdf
    ///   pdfmerger chapter*.pdf -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// Without it the result is written to the first free Merged_<n>.pdf in
    /// the output directory.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for unnamed outputs (default: the desktop)
    #[arg(long, value_name = "DIR", env = "PDFMERGER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Merge the pages listed in this JSON page order file
    ///
    /// The file holds a list of {"source": PATH, "pageNumber": N} entries,
    /// as printed by --list-pages. Its pages win over the file order.
    #[arg(long, value_name = "FILE")]
    pub order: Option<PathBuf>,

    /// Print the page order of the inputs as JSON and exit
    #[arg(long, conflicts_with_all = ["order", "output", "open"])]
    pub list_pages: bool,

    /// Open the merged file in the default viewer
    ///
    /// A viewer that cannot be launched is reported as a warning only.
    #[arg(long)]
    pub open: bool,

    /// Write the output without stream compression
    #[arg(long)]
    pub no_compress: bool,

    /// Quiet mode - only print the output path and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show per-file details and statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Append log lines to this file (default: pdfmerger.log next to the
    /// executable)
    #[arg(long, value_name = "FILE", env = "PDFMERGER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Convert CLI arguments to a validated configuration.
    pub fn to_config(&self) -> Result<Config> {
        let mut log = LogConfig::default();
        if let Some(file) = &self.log_file {
            log.file = Some(file.clone());
        }
        log.stderr = self.verbose;
        if self.verbose {
            log.default_directive = "pdfmerger=debug".to_string();
        }

        let config = Config {
            output: self.output.clone(),
            output_dir: self.output_dir.clone(),
            compress: !self.no_compress,
            log,
            quiet: self.quiet,
            verbose: self.verbose,
            ..Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Expand the input patterns into paths, in argument order.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let paths = collect_paths_for_patterns(&self.inputs)?;
        if paths.is_empty() {
            return Err(PdfMergerError::NoFilesToMerge);
        }
        Ok(paths)
    }
}
