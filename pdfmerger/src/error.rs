//! Error types for pdfmerger.
//!
//! Every fallible operation in the library returns [`PdfMergerError`].
//! Errors fall into a few categories:
//!
//! - **Invalid input**: empty paths, non-PDF extensions, missing files,
//!   out-of-range page numbers. Reported before any I/O side effect.
//! - **PDF errors**: a source cannot be parsed, is encrypted or has no pages.
//! - **Output errors**: the merged document cannot be staged or written.
//! - **Merge failures**: any of the above raised while a merge is running,
//!   wrapped so the message names the operation.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmerger operations.
pub type Result<T> = std::result::Result<T, PdfMergerError>;

/// Main error type for pdfmerger operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergerError {
    /// A path argument was empty.
    #[error("File path cannot be empty")]
    InvalidPath,

    /// The path does not carry a `.pdf` extension.
    #[error("File is not a PDF: {}", path.display())]
    NotAPdf {
        /// Offending path.
        path: PathBuf,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file exists but cannot be accessed.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF parsed but its structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// A page reference points outside its source document.
    #[error(
        "Page {page} is out of range for PDF: {}\n  PDF has {page_count} page(s)",
        path.display()
    )]
    PageOutOfRange {
        /// Source document path.
        path: PathBuf,
        /// Requested 1-based page number.
        page: u32,
        /// Number of pages in the source.
        page_count: u32,
    },

    /// Nothing to merge: no files and no custom page order.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// A merge is already running in this session.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// Failed to create the output (or its staging file).
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A merge aborted. Wraps the error that stopped it.
    #[error("Error merging PDF files: {source}")]
    MergeFailed {
        /// The error that aborted the merge.
        source: Box<PdfMergerError>,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// A background task panicked or was cancelled.
    #[error("Background task failed: {reason}")]
    TaskFailed {
        /// Join error description.
        reason: String,
    },

    /// Page order file could not be decoded.
    #[error("Invalid page order: {source}")]
    InvalidPageOrder {
        /// Underlying decode error.
        #[from]
        source: serde_json::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfMergerError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PdfMergerError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed {
            reason: err.to_string(),
        }
    }
}

impl PdfMergerError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create a NotAPdf error.
    pub fn not_a_pdf(path: impl Into<PathBuf>) -> Self {
        Self::NotAPdf { path: path.into() }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: impl Into<PathBuf>) -> Self {
        Self::EncryptedPdf { path: path.into() }
    }

    /// Wrap an error raised while merging.
    ///
    /// Errors that are already wrapped are returned unchanged.
    pub fn merge_failed(source: PdfMergerError) -> Self {
        match source {
            err @ Self::MergeFailed { .. } => err,
            err => Self::MergeFailed {
                source: Box::new(err),
            },
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error was caused by bad caller input rather than I/O.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::InvalidPath
            | Self::NotAPdf { .. }
            | Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::PageOutOfRange { .. }
            | Self::NoFilesToMerge
            | Self::InvalidConfig { .. }
            | Self::InvalidPageOrder { .. } => true,
            Self::MergeFailed { source } => source.is_invalid_input(),
            _ => false,
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPath => 1,
            Self::NotAPdf { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::PageOutOfRange { .. } => 1,
            Self::NoFilesToMerge => 1,
            Self::MergeInProgress => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { source } => match source.exit_code() {
                1 => 6,
                code => code,
            },
            Self::InvalidConfig { .. } => 1,
            Self::TaskFailed { .. } => 6,
            Self::InvalidPageOrder { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
