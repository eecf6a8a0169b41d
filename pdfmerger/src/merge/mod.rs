//! PDF merging operations.
//!
//! This module provides the merge orchestrator:
//! - Whole-file concatenation in list order
//! - Custom page orders across several sources, each opened once
//! - Progress reporting as integer percentages
//! - Release of every opened source on every exit path
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::merge::merge_pdfs;
//! use pdfmerger::validation::create_source_document;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let files = vec![
//!     create_source_document(Path::new("a.pdf"))?,
//!     create_source_document(Path::new("b.pdf"))?,
//! ];
//!
//! let output = merge_pdfs(files, None, None, None).await?;
//! println!("Merged into {}", output.display());
//! # Ok(())
//! # }
//! ```

pub mod merger;
pub mod pages;
pub mod sources;

pub use merger::{MergeRequest, MergeResult, MergeStatistics, Merger};
pub use pages::OutputBuilder;
pub use sources::{OpenSources, SourceHandle};

use crate::error::Result;
use crate::order::OrderedPageList;
use crate::output::ProgressSink;
use crate::validation::SourceDocument;
use std::path::PathBuf;
use std::sync::Arc;

/// Merge `files`, or the pages of `custom_order` when it is non-empty, into
/// one document and return its path.
///
/// Runs on the blocking thread pool with default settings. Without `output`
/// the result is written to the first free `Merged_<n>.pdf` in the default
/// output directory.
///
/// # Errors
///
/// See [`Merger::merge`].
pub async fn merge_pdfs(
    files: Vec<SourceDocument>,
    output: Option<PathBuf>,
    progress: Option<Arc<dyn ProgressSink>>,
    custom_order: Option<OrderedPageList>,
) -> Result<PathBuf> {
    let merger = Merger::new();
    let result = merger
        .merge(MergeRequest::new(files, custom_order), output, progress)
        .await?;
    Ok(result.output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfMergerError;
    use crate::order::PageReference;
    use crate::testing::{page_tags, write_test_pdf};
    use crate::validation::create_source_document;
    use lopdf::Document;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_merge_pdfs_custom_order_wins() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_test_pdf(temp_dir.path(), "a.pdf", 2);
        let b = write_test_pdf(temp_dir.path(), "b.pdf", 1);
        let files = vec![
            create_source_document(&a).unwrap(),
            create_source_document(&b).unwrap(),
        ];
        let order: OrderedPageList =
            vec![PageReference::new(&b, 1), PageReference::new(&a, 2)].into();
        let output = temp_dir.path().join("out.pdf");

        let path = merge_pdfs(files, Some(output.clone()), None, Some(order))
            .await
            .unwrap();

        assert_eq!(path, output);
        assert_eq!(
            page_tags(&Document::load(&path).unwrap()),
            vec!["b:1", "a:2"]
        );
    }

    #[tokio::test]
    async fn test_merge_pdfs_empty_order_falls_back_to_empty_files() {
        let result = merge_pdfs(vec![], None, None, Some(OrderedPageList::new())).await;
        assert!(matches!(result, Err(PdfMergerError::NoFilesToMerge)));
    }
}
