//! Page-level assembly of the output document.
//!
//! [`OutputBuilder`] starts from an empty document and appends pages one at
//! a time, each copied out of an open source together with every object it
//! references. Sources are renumbered into an id range above everything
//! already in the output before their first page is copied, so objects from
//! different sources never collide and a page used twice shares its content
//! streams.

use chrono::Local;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::{PdfMergerError, Result};
use crate::merge::sources::SourceHandle;
use crate::utils::copy_references;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Builds the merged document page by page.
pub struct OutputBuilder {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl OutputBuilder {
    /// Start an empty output document.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Renumber a freshly opened source above every id in use.
    pub fn adopt(&mut self, source: &mut Document) {
        source.renumber_objects_with(self.document.max_id + 1);
        self.document.max_id = self.document.max_id.max(source.max_id);

        if source.version > self.document.version {
            self.document.version = source.version.clone();
        }
    }

    /// Append page `page_number` (1-based) of `source`.
    ///
    /// # Errors
    ///
    /// - [`PdfMergerError::PageOutOfRange`] if the source has no such page
    /// - [`PdfMergerError::CorruptedPdf`] if the page object is not a
    ///   dictionary
    pub fn append_page(&mut self, source: &SourceHandle, page_number: u32) -> Result<()> {
        let page_id = source
            .page_id(page_number)
            .ok_or_else(|| PdfMergerError::PageOutOfRange {
                path: source.path().to_path_buf(),
                page: page_number,
                page_count: source.page_count(),
            })?;

        let doc = source.document();
        let mut page = doc
            .get_dictionary(page_id)
            .map_err(|e| PdfMergerError::corrupted_pdf(source.path(), e.to_string()))?
            .clone();

        inherit_attributes(doc, &mut page);
        page.remove(b"Parent");

        for (_, value) in page.iter() {
            copy_references(&mut self.document, doc, value);
        }
        page.set("Parent", self.pages_id);

        let new_page_id = self.document.add_object(page);
        self.kids.push(Object::Reference(new_page_id));

        Ok(())
    }

    /// Append every page of `source` in page order.
    pub fn append_all(&mut self, source: &SourceHandle) -> Result<()> {
        for page_number in source.page_numbers() {
            self.append_page(source, page_number)?;
        }
        Ok(())
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Close the page tree and return the finished document.
    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let now = Local::now().format("D:%Y%m%d%H%M%S").to_string();
        let info_id = self.document.add_object(dictionary! {
            "Producer" => Object::string_literal(format!("{} {}", crate::NAME, crate::VERSION)),
            "CreationDate" => Object::string_literal(now.clone()),
            "ModDate" => Object::string_literal(now),
        });
        self.document.trailer.set("Info", info_id);

        self.document.renumber_objects();
        self.document
    }
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy inheritable attributes from the page's ancestors onto the page.
///
/// The nearest ancestor wins; attributes the page sets itself are kept.
fn inherit_attributes(doc: &Document, page: &mut Dictionary) {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }
}
