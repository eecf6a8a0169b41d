//! Page ordering model.
//!
//! An [`OrderedPageList`] is the flattened sequence of pages the merge will
//! emit, built from the selected sources and then reordered or trimmed. The
//! merge only looks at list order; `display_order` is kept for callers that
//! show positions.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerger::order::OrderedPageList;
//! use pdfmerger::validation::create_source_document;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let a = create_source_document(Path::new("a.pdf"))?;
//! let b = create_source_document(Path::new("b.pdf"))?;
//!
//! let mut pages = OrderedPageList::load_pages(&[a, b])?;
//! let last = pages.get(pages.len() - 1).cloned().unwrap();
//! pages.move_page(&last, 0);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::PdfReader;
use crate::validation::SourceDocument;

/// One page of one source document.
///
/// Equality and hashing consider only the source path and page number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PageEntry", into = "PageEntry")]
pub struct PageReference {
    source: PathBuf,
    page_number: u32,
    label: String,
    display_order: usize,
}

/// Serialized form of a [`PageReference`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageEntry {
    source: PathBuf,
    page_number: u32,
}

impl TryFrom<PageEntry> for PageReference {
    type Error = String;

    fn try_from(entry: PageEntry) -> std::result::Result<Self, Self::Error> {
        if entry.page_number == 0 {
            return Err(format!(
                "page numbers start at 1 (got 0 for {})",
                entry.source.display()
            ));
        }
        Ok(PageReference::new(entry.source, entry.page_number))
    }
}

impl From<PageReference> for PageEntry {
    fn from(page: PageReference) -> Self {
        PageEntry {
            source: page.source,
            page_number: page.page_number,
        }
    }
}

impl PageReference {
    /// Reference page `page_number` (1-based) of `source`.
    pub fn new(source: impl Into<PathBuf>, page_number: u32) -> Self {
        let source = source.into();
        let label = page_label(&source, page_number);
        Self {
            source,
            page_number,
            label,
            display_order: 0,
        }
    }

    /// Path of the source document.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// 1-based page number within the source.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Display label, `"<file stem> - Page <n>"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 1-based position in the owning list; 0 when not in a list.
    pub fn display_order(&self) -> usize {
        self.display_order
    }
}

impl PartialEq for PageReference {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.page_number == other.page_number
    }
}

impl Eq for PageReference {}

impl Hash for PageReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.page_number.hash(state);
    }
}

impl std::fmt::Display for PageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

fn page_label(source: &Path, page_number: u32) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{stem} - Page {page_number}")
}

/// Where a dragged page is dropped, relative to the entry under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Above the entry at this index.
    Before(usize),
    /// Below the entry at this index.
    After(usize),
    /// Past the last entry.
    End,
}

/// Pages in the order they will be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PageReference>", into = "Vec<PageReference>")]
pub struct OrderedPageList {
    pages: Vec<PageReference>,
}

impl From<Vec<PageReference>> for OrderedPageList {
    fn from(pages: Vec<PageReference>) -> Self {
        let mut list = Self { pages };
        list.renumber();
        list
    }
}

impl From<OrderedPageList> for Vec<PageReference> {
    fn from(list: OrderedPageList) -> Self {
        list.pages
    }
}

impl OrderedPageList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `sources` into one reference per page, file order then page
    /// order.
    ///
    /// Every source is reopened and its pages recounted before the list is
    /// built, so a source that has since disappeared, stopped parsing or
    /// changed length fails the whole call or yields its current pages.
    pub fn load_pages(sources: &[SourceDocument]) -> Result<Self> {
        let reader = PdfReader::new();
        let counts = sources
            .iter()
            .map(|source| reader.page_count(source.path()))
            .collect::<Result<Vec<u32>>>()?;

        let pages: Vec<PageReference> = sources
            .iter()
            .zip(counts)
            .flat_map(|(source, count)| {
                (1..=count).map(move |n| PageReference::new(source.path(), n))
            })
            .collect();

        tracing::info!(
            sources = sources.len(),
            pages = pages.len(),
            "loaded pages for reordering"
        );

        Ok(Self::from(pages))
    }

    /// [`load_pages`](Self::load_pages) on the blocking thread pool.
    pub async fn load_pages_async(sources: Vec<SourceDocument>) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::load_pages(&sources)).await?
    }

    /// Parse a list from its JSON form, `[{"source": ..., "pageNumber": ...}]`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the list as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the list has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index`.
    pub fn get(&self, index: usize) -> Option<&PageReference> {
        self.pages.get(index)
    }

    /// Iterate pages in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageReference> {
        self.pages.iter()
    }

    /// Pages in merge order.
    pub fn as_slice(&self) -> &[PageReference] {
        &self.pages
    }

    /// Index of the first entry equal to `page`.
    pub fn index_of(&self, page: &PageReference) -> Option<usize> {
        self.pages.iter().position(|p| p == page)
    }

    /// Distinct sources in order of first appearance.
    pub fn sources(&self) -> Vec<&Path> {
        let mut seen: Vec<&Path> = Vec::new();
        for page in &self.pages {
            if !seen.contains(&page.source()) {
                seen.push(page.source());
            }
        }
        seen
    }

    /// Append a page at the end.
    pub fn push(&mut self, page: PageReference) {
        self.pages.push(page);
        self.renumber();
    }

    /// Move `page` to `new_index`, keeping every other entry's relative
    /// order.
    ///
    /// Returns `false` and leaves the list unchanged when the page is not in
    /// the list, `new_index` is out of bounds, or it is already there.
    pub fn move_page(&mut self, page: &PageReference, new_index: usize) -> bool {
        match self.index_of(page) {
            Some(current) => self.move_index(current, new_index),
            None => false,
        }
    }

    /// Move the entry at `from` to `to`. Same rules as
    /// [`move_page`](Self::move_page).
    pub fn move_index(&mut self, from: usize, to: usize) -> bool {
        if from >= self.pages.len() || to >= self.pages.len() || from == to {
            return false;
        }

        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        self.renumber();
        true
    }

    /// Move `page` to where it was dropped.
    ///
    /// The drop slot is counted in the list as it is before the move, so a
    /// slot below the dragged entry ends up one lower once it is taken out.
    pub fn move_to_drop_target(&mut self, page: &PageReference, target: DropPosition) -> bool {
        let Some(current) = self.index_of(page) else {
            return false;
        };

        let slot = match target {
            DropPosition::Before(i) => i,
            DropPosition::After(i) => i.saturating_add(1),
            DropPosition::End => self.pages.len(),
        }
        .min(self.pages.len());

        let new_index = if slot > current { slot - 1 } else { slot };
        self.move_index(current, new_index)
    }

    /// Whether the entry at `index` can move one place up.
    pub fn can_move_up(&self, index: usize) -> bool {
        index > 0 && index < self.pages.len()
    }

    /// Whether the entry at `index` can move one place down.
    pub fn can_move_down(&self, index: usize) -> bool {
        index + 1 < self.pages.len()
    }

    /// Swap the entry at `index` with the one above it.
    pub fn move_up(&mut self, index: usize) -> bool {
        self.can_move_up(index) && self.move_index(index, index - 1)
    }

    /// Swap the entry at `index` with the one below it.
    pub fn move_down(&mut self, index: usize) -> bool {
        self.can_move_down(index) && self.move_index(index, index + 1)
    }

    /// Remove the first entry equal to `page`.
    ///
    /// Returns `None` when it is not in the list, so removing the same
    /// reference twice changes nothing the second time.
    pub fn remove(&mut self, page: &PageReference) -> Option<PageReference> {
        let index = self.index_of(page)?;
        self.remove_at(index)
    }

    /// Remove the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<PageReference> {
        if index >= self.pages.len() {
            return None;
        }

        let mut page = self.pages.remove(index);
        page.display_order = 0;
        self.renumber();
        Some(page)
    }

    /// Drop every page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    fn renumber(&mut self) {
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.display_order = index + 1;
        }
    }
}

impl<'a> IntoIterator for &'a OrderedPageList {
    type Item = &'a PageReference;
    type IntoIter = std::slice::Iter<'a, PageReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl FromIterator<PageReference> for OrderedPageList {
    fn from_iter<I: IntoIterator<Item = PageReference>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
