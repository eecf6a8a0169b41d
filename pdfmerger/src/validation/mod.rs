//! Input validation for pdfmerger.
//!
//! Paths are checked before they enter a session or a merge:
//! - Extension check ([`is_pdf_file`]), pure and infallible
//! - Existence and file-type checks
//! - A read-only open of the document to count its pages
//!
//! A path that passes becomes a [`SourceDocument`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::validation::{create_source_document, is_pdf_file};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! assert!(is_pdf_file(Path::new("report.PDF")));
//! let source = create_source_document(Path::new("report.pdf"))?;
//! println!("{} has {} pages", source.file_name(), source.page_count());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::error::{PdfMergerError, Result};
use crate::io::PdfReader;
use crate::utils::format_file_size;

/// Check whether `path` carries a `.pdf` extension, ignoring case.
///
/// Never fails: empty paths, paths without an extension and extensions that
/// are not valid UTF-8 all yield `false`.
pub fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// An existing PDF file selected as merge input.
///
/// Read-only snapshot of the file taken at construction time. The only way
/// to get one is through [`Validator::validate_file`], so every instance
/// names a file that existed and parsed when it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    file_name: String,
    page_count: u32,
    file_size: u64,
    last_modified: Option<DateTime<Local>>,
}

impl SourceDocument {
    /// Path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the path.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// File size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Last modification time, when the platform reports one.
    pub fn last_modified(&self) -> Option<DateTime<Local>> {
        self.last_modified
    }

    /// Size formatted for display, e.g. `"12.5 KB"`.
    pub fn formatted_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

impl std::fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Validates paths and turns them into [`SourceDocument`]s.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Validate `path` and snapshot it as a [`SourceDocument`].
    ///
    /// Argument checks run before any I/O.
    ///
    /// # Errors
    ///
    /// - [`PdfMergerError::InvalidPath`] for an empty path
    /// - [`PdfMergerError::NotAPdf`] when the extension is not `.pdf`
    /// - [`PdfMergerError::FileNotFound`] / [`PdfMergerError::NotAFile`]
    /// - PDF load errors when the document cannot be opened
    pub fn validate_file(&self, path: &Path) -> Result<SourceDocument> {
        if path.as_os_str().is_empty() {
            return Err(PdfMergerError::InvalidPath);
        }

        if !is_pdf_file(path) {
            return Err(PdfMergerError::not_a_pdf(path));
        }

        PdfReader::check_path_exists(path)?;

        let metadata = std::fs::metadata(path).map_err(|source| {
            PdfMergerError::FileNotAccessible {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let page_count = self.reader.page_count(path)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(SourceDocument {
            path: path.to_path_buf(),
            file_name,
            page_count,
            file_size: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Local>::from),
        })
    }

    /// Validate several paths, stopping at the first failure.
    pub fn validate_files(&self, paths: &[PathBuf]) -> Result<Vec<SourceDocument>> {
        paths.iter().map(|path| self.validate_file(path)).collect()
    }
}

/// Validate `path` and snapshot it as a [`SourceDocument`].
///
/// See [`Validator::validate_file`].
pub fn create_source_document(path: &Path) -> Result<SourceDocument> {
    Validator::new().validate_file(path)
}

/// [`create_source_document`] on the blocking thread pool.
pub async fn create_source_document_async(path: PathBuf) -> Result<SourceDocument> {
    tokio::task::spawn_blocking(move || create_source_document(&path)).await?
}
