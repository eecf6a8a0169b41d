//! Integration tests for error handling and edge cases.

use pdfmerger::error::PdfMergerError;
use pdfmerger::merge::{MergeRequest, Merger, merge_pdfs};
use pdfmerger::order::{OrderedPageList, PageReference};
use pdfmerger::session::MergeSession;
use pdfmerger::validation::{create_source_document, is_pdf_file};
use rstest::rstest;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{tagged_source, write_tagged_pdf};

#[rstest]
#[case("report.pdf", true)]
#[case("REPORT.PDF", true)]
#[case("archive.tar.Pdf", true)]
#[case("notes.txt", false)]
#[case("pdf", false)]
#[case("", false)]
fn test_is_pdf_file(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_pdf_file(Path::new(path)), expected);
}

#[test]
fn test_create_source_document_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_tagged_pdf(temp_dir.path(), "snapshot.pdf", 3);

    let source = create_source_document(&path).unwrap();

    assert_eq!(source.path(), path);
    assert_eq!(source.file_name(), "snapshot.pdf");
    assert_eq!(source.page_count(), 3);
    assert_eq!(source.file_size(), std::fs::metadata(&path).unwrap().len());
    assert!(source.last_modified().is_some());
}

#[rstest]
#[case::missing("missing.pdf", false)]
#[case::garbage("garbage.pdf", true)]
#[case::wrong_extension("notes.txt", true)]
fn test_create_source_document_rejects(#[case] name: &str, #[case] create: bool) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    if create {
        std::fs::write(&path, b"this is not a pdf").unwrap();
    }

    let err = create_source_document(&path).unwrap_err();
    match name {
        "missing.pdf" => assert!(matches!(err, PdfMergerError::FileNotFound { .. })),
        "garbage.pdf" => assert!(matches!(err, PdfMergerError::FailedToLoadPdf { .. })),
        _ => assert!(matches!(err, PdfMergerError::NotAPdf { .. })),
    }
}

#[test]
fn test_create_source_document_empty_path() {
    assert!(matches!(
        create_source_document(Path::new("")),
        Err(PdfMergerError::InvalidPath)
    ));
}

#[tokio::test]
async fn test_empty_request_is_rejected() {
    let result = merge_pdfs(vec![], None, None, None).await;
    assert!(matches!(result, Err(PdfMergerError::NoFilesToMerge)));
}

#[tokio::test]
async fn test_source_deleted_before_merge() {
    let temp_dir = TempDir::new().unwrap();
    let kept = tagged_source(temp_dir.path(), "kept.pdf", 1);
    let deleted = tagged_source(temp_dir.path(), "deleted.pdf", 1);
    std::fs::remove_file(deleted.path()).unwrap();
    let output = temp_dir.path().join("never.pdf");

    let err = merge_pdfs(vec![kept, deleted], Some(output.clone()), None, None)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Error merging PDF files: "));
    assert!(matches!(
        &err,
        PdfMergerError::MergeFailed { source } if matches!(**source, PdfMergerError::FileNotFound { .. })
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_page_beyond_source_length() {
    let temp_dir = TempDir::new().unwrap();
    let source = tagged_source(temp_dir.path(), "short.pdf", 2);
    let order: OrderedPageList = vec![
        PageReference::new(source.path(), 1),
        PageReference::new(source.path(), 5),
    ]
    .into();
    let output = temp_dir.path().join("never.pdf");

    let err = Merger::new()
        .merge(MergeRequest::CustomOrder(order), Some(output.clone()), None)
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        PdfMergerError::MergeFailed { source } if matches!(**source, PdfMergerError::PageOutOfRange { page: 5, .. })
    ));
    assert!(err.is_invalid_input());
    assert!(!output.exists());
}

#[test]
fn test_page_order_json_errors() {
    assert!(matches!(
        OrderedPageList::from_json("not json"),
        Err(PdfMergerError::InvalidPageOrder { .. })
    ));
    assert!(matches!(
        OrderedPageList::from_json(r#"[{"source": "a.pdf", "pageNumber": 0}]"#),
        Err(PdfMergerError::InvalidPageOrder { .. })
    ));

    let pages = OrderedPageList::from_json(r#"[{"source": "a.pdf", "pageNumber": 2}]"#).unwrap();
    assert_eq!(pages.get(0), Some(&PageReference::new(PathBuf::from("a.pdf"), 2)));
}

#[test]
fn test_session_rejects_non_pdf_and_keeps_state() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_tagged_pdf(temp_dir.path(), "good.pdf", 1);
    let text = temp_dir.path().join("readme.txt");
    std::fs::write(&text, b"hello").unwrap();

    let mut session = MergeSession::new();
    session.add_file(&good).unwrap();

    assert!(matches!(
        session.add_file(&text),
        Err(PdfMergerError::NotAPdf { .. })
    ));
    assert_eq!(session.len(), 1);
    assert!(!session.can_merge());
}
