//! pdfmerger - Merge PDF files, optionally in a custom page order.
//!
//! This library provides:
//!
//! - Whole-file merging in list order
//! - Page-level reordering and removal before a merge
//! - Progress reporting over channels while the merge runs in the background
//! - A working file list with the guards a front end needs
//! - Structured logging to an append-only file
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfmerger::merge::merge_pdfs;
//! use pdfmerger::validation::create_source_document;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let files = vec![
//!     create_source_document(Path::new("a.pdf"))?,
//!     create_source_document(Path::new("b.pdf"))?,
//! ];
//!
//! let output = merge_pdfs(files, Some(PathBuf::from("merged.pdf")), None, None).await?;
//! println!("Wrote {}", output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reordering Pages
//!
//! ```no_run
//! use pdfmerger::session::MergeSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new();
//! session.add_files(["a.pdf", "b.pdf"])?;
//!
//! let mut pages = session.page_order().await?;
//! let first = pages.get(0).cloned().unwrap();
//! pages.remove(&first);
//!
//! let result = session.merge(None, None, Some(pages)).await?;
//! println!("Wrote {}", result.output_path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod merge;
pub mod order;
pub mod output;
pub mod session;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfMergerError, Result};
pub use merge::{MergeRequest, Merger};
pub use order::{OrderedPageList, PageReference};
pub use session::MergeSession;
pub use validation::{SourceDocument, create_source_document, is_pdf_file};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
