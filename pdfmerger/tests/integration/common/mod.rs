//! Fixture helpers for the integration tests.
//!
//! Fixtures are generated on the fly with lopdf. Every page carries a `Tag`
//! string `"<file stem>:<page number>"` so a merged document's page order
//! can be checked.

use lopdf::{Document, Object, Stream, dictionary};
use pdfmerger::validation::{SourceDocument, create_source_document};
use std::path::{Path, PathBuf};

/// Write a PDF with `pages` tagged pages to `dir/name`.
pub fn write_tagged_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    let tag = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for n in 1..=pages {
        let text = format!("BT /F1 24 Tf 72 720 Td ({tag} page {n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, text.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Tag" => Object::string_literal(format!("{tag}:{n}")),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
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

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write fixture");
    path
}

/// Write a tagged PDF and describe it as a merge source.
pub fn tagged_source(dir: &Path, name: &str, pages: u32) -> SourceDocument {
    let path = write_tagged_pdf(dir, name, pages);
    create_source_document(&path).expect("Fixture should validate")
}

/// Tags of the pages of the PDF at `path`, in page order.
pub fn page_tags(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Output should be a readable PDF");
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_dictionary(*page_id).expect("Page should be a dictionary");
            let tag = page
                .get(b"Tag")
                .and_then(|t| t.as_str())
                .expect("Page should carry a tag");
            String::from_utf8_lossy(tag).into_owned()
        })
        .collect()
}

/// Whether every page of the PDF at `path` has a media box, either its own
/// or inherited from the page tree.
pub fn all_pages_have_media_box(path: &Path) -> bool {
    let doc = Document::load(path).expect("Output should be a readable PDF");
    doc.get_pages().values().all(|page_id| {
        let mut current = doc.get_dictionary(*page_id).ok();
        while let Some(dict) = current {
            if dict.has(b"MediaBox") {
                return true;
            }
            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| doc.get_dictionary(id))
                .ok();
        }
        false
    })
}
