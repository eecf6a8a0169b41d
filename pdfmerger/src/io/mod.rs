//! I/O operations for pdfmerger.
//!
//! This module handles all file I/O operations including:
//! - Opening source PDFs read-only
//! - Writing the merged PDF through a staging file
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = PdfReader::new().open(Path::new("input.pdf"))?;
//! PdfWriter::new().save_blocking(&mut doc, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{DocumentLoader, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
