//! The working file list.
//!
//! A [`MergeSession`] holds the files picked for merging, in merge order,
//! together with the guards a front end uses to enable or disable its
//! actions. Only one merge may run per session at a time.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::session::MergeSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new();
//! session.add_files(["a.pdf", "b.pdf"])?;
//! session.move_up(1);
//!
//! if session.can_merge() {
//!     let result = session.merge(None, None, None).await?;
//!     println!("Merged into {}", result.output_path.display());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{PdfMergerError, Result};
use crate::merge::{MergeRequest, MergeResult, Merger};
use crate::order::OrderedPageList;
use crate::output::ProgressSink;
use crate::validation::{SourceDocument, Validator, is_pdf_file};

/// Files selected for merging plus the merge re-entrancy guard.
#[derive(Debug, Default)]
pub struct MergeSession {
    files: Vec<SourceDocument>,
    merger: Merger,
    validator: Validator,
    merging: Arc<AtomicBool>,
}

/// Clears the merging flag when dropped.
struct MergingGuard(Arc<AtomicBool>);

impl MergingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PdfMergerError::MergeInProgress)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for MergingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MergeSession {
    /// Create an empty session with default merge settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session that merges with `merger`.
    pub fn with_merger(merger: Merger) -> Self {
        Self {
            merger,
            ..Self::default()
        }
    }

    /// Files in merge order.
    pub fn files(&self) -> &[SourceDocument] {
        &self.files
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files have been added.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of pages across all files.
    pub fn total_pages(&self) -> u64 {
        self.files.iter().map(|f| u64::from(f.page_count())).sum()
    }

    /// Validate `path` and append it.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<&SourceDocument> {
        let path = path.as_ref();
        if !is_pdf_file(path) {
            tracing::warn!(path = %path.display(), "rejected file that is not a PDF");
            return Err(PdfMergerError::not_a_pdf(path));
        }

        let source = self.validator.validate_file(path).inspect_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "rejected file");
        })?;

        tracing::info!(
            path = %path.display(),
            pages = source.page_count(),
            "added file"
        );
        self.files.push(source);
        Ok(&self.files[self.files.len() - 1])
    }

    /// Add several files, stopping at the first one that fails.
    ///
    /// Files before the failing one stay added.
    pub fn add_files<I, P>(&mut self, paths: I) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut added = 0;
        for path in paths {
            self.add_file(path)?;
            added += 1;
        }
        Ok(added)
    }

    /// Remove the file at `index`.
    pub fn remove_file(&mut self, index: usize) -> Option<SourceDocument> {
        if !self.can_remove(index) {
            return None;
        }
        let removed = self.files.remove(index);
        tracing::info!(path = %removed.path().display(), "removed file");
        Some(removed)
    }

    /// Remove every file.
    pub fn clear(&mut self) {
        if !self.files.is_empty() {
            tracing::info!(files = self.files.len(), "cleared file list");
        }
        self.files.clear();
    }

    /// Move the file at `from` to `to`, keeping the order of the others.
    pub fn move_file(&mut self, from: usize, to: usize) -> bool {
        if from >= self.files.len() || to >= self.files.len() || from == to {
            return false;
        }
        let file = self.files.remove(from);
        self.files.insert(to, file);
        true
    }

    /// Swap the file at `index` with the one above it.
    pub fn move_up(&mut self, index: usize) -> bool {
        self.can_move_up(index) && self.move_file(index, index - 1)
    }

    /// Swap the file at `index` with the one below it.
    pub fn move_down(&mut self, index: usize) -> bool {
        self.can_move_down(index) && self.move_file(index, index + 1)
    }

    /// At least two files and no merge running.
    pub fn can_merge(&self) -> bool {
        self.files.len() >= 2 && !self.is_merging()
    }

    /// Whether `index` names a file.
    pub fn can_remove(&self, index: usize) -> bool {
        index < self.files.len()
    }

    /// Whether the file at `index` has a file above it.
    pub fn can_move_up(&self, index: usize) -> bool {
        index > 0 && index < self.files.len()
    }

    /// Whether the file at `index` has a file below it.
    pub fn can_move_down(&self, index: usize) -> bool {
        index + 1 < self.files.len()
    }

    /// Whether there is anything to clear.
    pub fn can_clear(&self) -> bool {
        !self.files.is_empty()
    }

    /// Whether a merge is running.
    pub fn is_merging(&self) -> bool {
        self.merging.load(Ordering::Acquire)
    }

    /// One page reference per page of every file, for reordering.
    pub async fn page_order(&self) -> Result<OrderedPageList> {
        OrderedPageList::load_pages_async(self.files.clone()).await
    }

    /// Merge the current files, or `custom_order` when it is non-empty.
    ///
    /// # Errors
    ///
    /// - [`PdfMergerError::MergeInProgress`] while another merge of this
    ///   session runs
    /// - Everything [`Merger::merge`] reports
    pub async fn merge(
        &self,
        output: Option<PathBuf>,
        progress: Option<Arc<dyn ProgressSink>>,
        custom_order: Option<OrderedPageList>,
    ) -> Result<MergeResult> {
        let _guard = MergingGuard::acquire(&self.merging)?;
        let request = MergeRequest::new(self.files.clone(), custom_order);
        self.merger.merge(request, output, progress).await
    }
}
