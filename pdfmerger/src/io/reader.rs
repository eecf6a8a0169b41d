//! PDF reading and loading operations.
//!
//! Sources are opened read-only with `lopdf`. [`PdfReader`] classifies load
//! failures (encrypted, unparsable, empty) and implements [`DocumentLoader`],
//! the seam the merge orchestrator opens and releases sources through.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let document = reader.open(Path::new("a.pdf"))?;
//! println!("{} pages", document.get_pages().len());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::Path;
use std::time::Instant;

use crate::error::{PdfMergerError, Result};

/// Opens and releases source documents.
///
/// The orchestrator calls [`load`](DocumentLoader::load) at most once per
/// distinct source in a merge and [`release`](DocumentLoader::release) once
/// for every successful load, on every exit path.
pub trait DocumentLoader: Send + Sync {
    /// Open the document at `path` read-only.
    fn load(&self, path: &Path) -> Result<Document>;

    /// Called when the handle for `path` is closed.
    fn release(&self, _path: &Path) {}
}

/// PDF reader. Documents without pages are rejected.
#[derive(Debug, Clone)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Open a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is a directory
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub fn open(&self, path: &Path) -> Result<Document> {
        Self::check_path_exists(path)?;

        let start = Instant::now();

        let doc = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfMergerError::encrypted_pdf(path)
            } else {
                PdfMergerError::failed_to_load_pdf(path, err_msg)
            }
        })?;

        if doc.get_pages().is_empty() {
            return Err(PdfMergerError::corrupted_pdf(path, "PDF has no pages"));
        }

        tracing::debug!(
            path = %path.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "opened source document"
        );

        Ok(doc)
    }

    /// Open a document only to count its pages; the handle is dropped
    /// before returning.
    pub fn page_count(&self, path: &Path) -> Result<u32> {
        let doc = self.open(path)?;
        Ok(doc.get_pages().len() as u32)
    }

    /// Ensure `path` names an existing regular file.
    pub fn check_path_exists(path: &Path) -> Result<()> {
        let exists = path
            .try_exists()
            .map_err(|source| PdfMergerError::FileNotAccessible {
                path: path.to_path_buf(),
                source,
            })?;

        if !exists {
            return Err(PdfMergerError::file_not_found(path));
        }

        if !path.is_file() {
            return Err(PdfMergerError::not_a_file(path));
        }

        Ok(())
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for PdfReader {
    fn load(&self, path: &Path) -> Result<Document> {
        self.open(path)
    }

    fn release(&self, path: &Path) {
        tracing::debug!(path = %path.display(), "closed source document");
    }
}
