//! Core PDF merging implementation.
//!
//! The merge builds the output in memory from a [`MergeRequest`], reporting
//! progress as it goes, and only then hands the document to the writer. The
//! writer stages the file next to the target, so nothing appears at the
//! output path unless every page was appended and written.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{Config, DEFAULT_BASE_NAME, PDF_EXTENSION};
use crate::error::{PdfMergerError, Result};
use crate::io::{DocumentLoader, PdfReader, PdfWriter, WriteOptions};
use crate::merge::pages::OutputBuilder;
use crate::merge::sources::OpenSources;
use crate::order::OrderedPageList;
use crate::output::progress::{ProgressSink, percent_of};
use crate::utils::{self, format_file_size};
use crate::validation::SourceDocument;

/// What to merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeRequest {
    /// Every page of every file, in list order.
    WholeFiles(Vec<SourceDocument>),
    /// Exactly these pages, in this order.
    CustomOrder(OrderedPageList),
}

impl MergeRequest {
    /// Pick the strategy: a non-empty custom order wins over the file list.
    pub fn new(files: Vec<SourceDocument>, custom_order: Option<OrderedPageList>) -> Self {
        match custom_order {
            Some(order) if !order.is_empty() => Self::CustomOrder(order),
            _ => Self::WholeFiles(files),
        }
    }

    /// Whether there is nothing to merge.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::WholeFiles(files) => files.is_empty(),
            Self::CustomOrder(order) => order.is_empty(),
        }
    }

    /// Number of distinct sources involved.
    pub fn source_count(&self) -> usize {
        match self {
            Self::WholeFiles(files) => files.len(),
            Self::CustomOrder(order) => order.sources().len(),
        }
    }
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of source documents opened.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Time spent assembling pages.
    pub merge_time: Duration,

    /// Time spent writing the output.
    pub write_time: Duration,

    /// Size of the written file.
    pub output_size: u64,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl MergeStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Where the merged document was written.
    pub output_path: PathBuf,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Merges source documents into one output file.
#[derive(Clone)]
pub struct Merger {
    /// Opens and releases sources.
    loader: Arc<dyn DocumentLoader>,

    /// Writes the finished document.
    writer: PdfWriter,

    /// Directory for outputs without an explicit path.
    output_dir: Option<PathBuf>,

    /// Base name of synthesized output files.
    base_name: String,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self {
            loader: Arc::new(PdfReader::new()),
            writer: PdfWriter::new(),
            output_dir: None,
            base_name: DEFAULT_BASE_NAME.to_string(),
        }
    }

    /// Create a merger that honors `config`'s output directory, base name
    /// and compression settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            writer: PdfWriter::with_options(WriteOptions {
                compress: config.compress,
                ..WriteOptions::default()
            }),
            output_dir: config.output_dir.clone(),
            base_name: config.base_name.trim().to_string(),
            ..Self::new()
        }
    }

    /// Use `loader` to open and release sources.
    pub fn with_loader(mut self, loader: Arc<dyn DocumentLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Use `writer` for the output.
    pub fn with_writer(mut self, writer: PdfWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Write unqualified outputs to `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Resolve the output path.
    ///
    /// An explicit path is used as is. Otherwise the first free
    /// `<base name>_<n>.pdf`, `n >= 1`, in the output directory.
    pub fn resolve_output(&self, output: Option<&Path>) -> PathBuf {
        match output {
            Some(path) => path.to_path_buf(),
            None => {
                let dir = self
                    .output_dir
                    .clone()
                    .unwrap_or_else(utils::default_output_dir);
                utils::unique_output_path(&dir, &self.base_name, PDF_EXTENSION)
            }
        }
    }

    /// Merge on the blocking thread pool.
    ///
    /// The caller's task keeps running; progress arrives through `progress`.
    ///
    /// # Errors
    ///
    /// - [`PdfMergerError::NoFilesToMerge`] for an empty request, before any
    ///   I/O
    /// - [`PdfMergerError::MergeFailed`] wrapping whatever stopped the merge
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerger::merge::{MergeRequest, Merger};
    /// # use pdfmerger::validation::SourceDocument;
    /// # async fn example(files: Vec<SourceDocument>) -> Result<(), Box<dyn std::error::Error>> {
    /// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<u8>();
    /// let merger = Merger::new();
    /// let merge = merger.merge(MergeRequest::WholeFiles(files), None, Some(std::sync::Arc::new(tx)));
    /// let printer = tokio::spawn(async move {
    ///     while let Some(percent) = rx.recv().await {
    ///         println!("{percent}%");
    ///     }
    /// });
    /// let result = merge.await?;
    /// printer.await?;
    /// println!("Merged into {}", result.output_path.display());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(
        &self,
        request: MergeRequest,
        output: Option<PathBuf>,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<MergeResult> {
        if request.is_empty() {
            return Err(PdfMergerError::NoFilesToMerge);
        }

        let merger = self.clone();
        tokio::task::spawn_blocking(move || {
            merger.merge_blocking(&request, output.as_deref(), progress.as_deref())
        })
        .await
        .map_err(|e| PdfMergerError::merge_failed(e.into()))?
    }

    /// Merge on the current thread.
    pub fn merge_blocking(
        &self,
        request: &MergeRequest,
        output: Option<&Path>,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<MergeResult> {
        if request.is_empty() {
            return Err(PdfMergerError::NoFilesToMerge);
        }

        let output_path = self.resolve_output(output);
        tracing::info!(
            sources = request.source_count(),
            output = %output_path.display(),
            "merge started"
        );

        match self.run(request, &output_path, progress) {
            Ok(statistics) => {
                tracing::info!(
                    files = statistics.files_merged,
                    pages = statistics.total_pages,
                    size = %statistics.format_output_size(),
                    merge_ms = statistics.merge_time.as_millis() as u64,
                    write_ms = statistics.write_time.as_millis() as u64,
                    output = %output_path.display(),
                    "merge finished"
                );
                Ok(MergeResult {
                    output_path,
                    statistics,
                })
            }
            Err(err) => {
                let err = PdfMergerError::merge_failed(err);
                tracing::error!(error = %err, "merge failed");
                Err(err)
            }
        }
    }

    fn run(
        &self,
        request: &MergeRequest,
        output_path: &Path,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<MergeStatistics> {
        let merge_start = Instant::now();
        let (mut document, files_merged) = self.assemble(request, progress)?;
        let merge_time = merge_start.elapsed();

        let total_pages = document.get_pages().len();
        let written = self.writer.save_blocking(&mut document, output_path)?;

        Ok(MergeStatistics {
            files_merged,
            total_pages,
            merge_time,
            write_time: written.write_time,
            output_size: written.file_size,
            compressed: written.compressed,
        })
    }

    /// Build the output document; returns it with the number of sources
    /// opened.
    fn assemble(
        &self,
        request: &MergeRequest,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<(Document, usize)> {
        let report = |percent: u8| {
            if let Some(sink) = progress {
                sink.report(percent);
            }
        };

        let mut sources = OpenSources::new(self.loader.as_ref());
        let mut builder = OutputBuilder::new();

        match request {
            MergeRequest::CustomOrder(order) => {
                let total = order.len();
                for (processed, page) in order.iter().enumerate() {
                    let handle = sources.get_or_open(page.source(), |doc| builder.adopt(doc))?;
                    builder.append_page(handle, page.page_number())?;
                    report(percent_of(processed + 1, total));
                }
            }
            MergeRequest::WholeFiles(files) => {
                let total = files.len();
                for (index, file) in files.iter().enumerate() {
                    let handle = sources.get_or_open(file.path(), |doc| builder.adopt(doc))?;
                    builder.append_all(handle)?;
                    sources.close(file.path());
                    report(percent_of(index + 1, total));
                }
            }
        }

        let opened = sources.opened();
        drop(sources);

        Ok((builder.finish(), opened))
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Merger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Merger")
            .field("writer", &self.writer)
            .field("output_dir", &self.output_dir)
            .field("base_name", &self.base_name)
            .finish_non_exhaustive()
    }
}
