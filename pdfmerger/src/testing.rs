//! Fixture helpers shared by unit tests.
//!
//! Every generated page carries a `Tag` entry `"<tag>:<page number>"` so the
//! order of pages in a merged document can be read back. `MediaBox` and
//! `Resources` live on the page tree root and are inherited by the pages.

use lopdf::{Document, Object, dictionary};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::io::DocumentLoader;
use crate::output::ProgressSink;

/// Build an in-memory document with `pages` tagged pages.
pub fn build_test_document(tag: &str, pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for n in 1..=pages {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Tag" => Object::string_literal(format!("{tag}:{n}")),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a tagged test document to `dir/name`; the tag is the file stem.
pub fn write_test_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    let path = dir.join(name);
    let tag = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut doc = build_test_document(&tag, pages);
    doc.save(&path).unwrap();
    path
}

/// Tags of the pages of `doc`, in page order.
pub fn page_tags(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_dictionary(*page_id).unwrap();
            let tag = page.get(b"Tag").and_then(|t| t.as_str()).unwrap();
            String::from_utf8_lossy(tag).into_owned()
        })
        .collect()
}

/// Loader that counts loads and releases per path.
pub struct CountingLoader<L> {
    inner: L,
    counts: Mutex<HashMap<PathBuf, (usize, usize)>>,
}

impl<L: DocumentLoader> CountingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            counts: Mutex::new(HashMap::new()),
        }
    }

    pub fn loads(&self, path: &Path) -> usize {
        self.counts.lock().unwrap().get(path).map_or(0, |c| c.0)
    }

    pub fn releases(&self, path: &Path) -> usize {
        self.counts.lock().unwrap().get(path).map_or(0, |c| c.1)
    }

    /// Whether every successful load was matched by a release.
    pub fn balanced(&self) -> bool {
        self.counts.lock().unwrap().values().all(|(l, r)| l == r)
    }
}

impl<L: DocumentLoader> DocumentLoader for CountingLoader<L> {
    fn load(&self, path: &Path) -> Result<Document> {
        let document = self.inner.load(path)?;
        self.counts
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .0 += 1;
        Ok(document)
    }

    fn release(&self, path: &Path) {
        self.inner.release(path);
        self.counts
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .1 += 1;
    }
}

/// Progress sink that records every value.
#[derive(Default)]
pub struct RecordingSink {
    values: Mutex<Vec<u8>>,
}

impl RecordingSink {
    pub fn values(&self) -> Vec<u8> {
        self.values.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, percent: u8) {
        self.values.lock().unwrap().push(percent);
    }
}
