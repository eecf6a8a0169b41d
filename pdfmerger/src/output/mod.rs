//! Output and progress display for pdfmerger.
//!
//! This module handles everything that reaches the user while a merge runs:
//! - Progress sinks the merge reports percentages to
//! - A terminal progress bar
//! - Formatted status messages with quiet and verbose modes
//! - A short report of the source list
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::output::OutputFormatter;
//! use pdfmerger::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{ProgressBar, ProgressSink, ProgressStyle, percent_of};

use crate::validation::SourceDocument;

/// One line per source: `name (N pages, size)`.
pub fn describe_sources(sources: &[SourceDocument]) -> Vec<String> {
    sources
        .iter()
        .map(|source| {
            let pages = match source.page_count() {
                1 => "1 page".to_string(),
                n => format!("{n} pages"),
            };
            format!("{} ({pages}, {})", source.file_name(), source.formatted_size())
        })
        .collect()
}

/// List the sources about to be merged, then their totals.
pub fn display_sources(formatter: &OutputFormatter, sources: &[SourceDocument]) {
    for (index, line) in describe_sources(sources).iter().enumerate() {
        formatter.list_item(index + 1, line);
    }

    let total_pages: u64 = sources.iter().map(|s| u64::from(s.page_count())).sum();
    formatter.debug(&format!(
        "{} file(s), {total_pages} pages",
        sources.len()
    ));
}
