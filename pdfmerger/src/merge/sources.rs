//! Source handles held open during one merge.

use lopdf::{Document, ObjectId};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::DocumentLoader;

/// An open source document and its page table.
pub struct SourceHandle {
    path: PathBuf,
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl SourceHandle {
    /// Path the document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Object id of 1-based page `page_number`.
    pub fn page_id(&self, page_number: u32) -> Option<ObjectId> {
        self.pages.get(&page_number).copied()
    }

    /// Page numbers in order.
    pub fn page_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }
}

/// Lazily opened source documents, keyed by path.
///
/// Each path is loaded at most once. Every handle still open when the value
/// is dropped is released through the loader, so an early return or a panic
/// in the middle of a merge cannot leak one.
pub struct OpenSources<'a> {
    loader: &'a dyn DocumentLoader,
    handles: HashMap<PathBuf, SourceHandle>,
    opened: usize,
}

impl<'a> OpenSources<'a> {
    /// Create an empty set backed by `loader`.
    pub fn new(loader: &'a dyn DocumentLoader) -> Self {
        Self {
            loader,
            handles: HashMap::new(),
            opened: 0,
        }
    }

    /// The handle for `path`, opening it on first use.
    ///
    /// `prepare` runs once on a freshly loaded document before its page
    /// table is read.
    pub fn get_or_open(
        &mut self,
        path: &Path,
        prepare: impl FnOnce(&mut Document),
    ) -> Result<&SourceHandle> {
        match self.handles.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut document = self.loader.load(path)?;
                prepare(&mut document);
                let pages = document.get_pages();

                self.opened += 1;
                Ok(&*entry.insert(SourceHandle {
                    path: path.to_path_buf(),
                    document,
                    pages,
                }))
            }
        }
    }

    /// Release the handle for `path` now instead of at drop.
    pub fn close(&mut self, path: &Path) {
        if self.handles.remove(path).is_some() {
            self.loader.release(path);
        }
    }

    /// Number of handles currently open.
    pub fn open_count(&self) -> usize {
        self.handles.len()
    }

    /// Number of loads performed so far.
    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl Drop for OpenSources<'_> {
    fn drop(&mut self) {
        for (path, _handle) in self.handles.drain() {
            self.loader.release(&path);
        }
    }
}
