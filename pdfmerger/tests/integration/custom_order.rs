//! Integration tests for merges driven by a page order.

use pdfmerger::merge::{MergeRequest, Merger};
use pdfmerger::order::{DropPosition, OrderedPageList, PageReference};
use pdfmerger::session::MergeSession;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

use crate::common::{all_pages_have_media_box, page_tags, tagged_source, write_tagged_pdf};

#[tokio::test]
async fn test_interleave_pages_of_two_files() {
    let temp_dir = TempDir::new().unwrap();
    let odd = tagged_source(temp_dir.path(), "odd.pdf", 2);
    let even = tagged_source(temp_dir.path(), "even.pdf", 2);

    let order: OrderedPageList = vec![
        PageReference::new(odd.path(), 1),
        PageReference::new(even.path(), 1),
        PageReference::new(odd.path(), 2),
        PageReference::new(even.path(), 2),
    ]
    .into();
    let output = temp_dir.path().join("interleaved.pdf");

    let result = Merger::new()
        .merge(MergeRequest::CustomOrder(order), Some(output.clone()), None)
        .await
        .unwrap();

    assert_eq!(result.statistics.files_merged, 2);
    assert_eq!(
        page_tags(&output),
        vec!["odd:1", "even:1", "odd:2", "even:2"]
    );
    assert!(all_pages_have_media_box(&output));
}

#[tokio::test]
async fn test_page_order_edited_through_json() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_tagged_pdf(temp_dir.path(), "a.pdf", 2);
    let b = write_tagged_pdf(temp_dir.path(), "b.pdf", 2);

    let mut session = MergeSession::with_merger(Merger::new().with_output_dir(temp_dir.path()));
    session.add_files([&a, &b]).unwrap();

    let listed = session.page_order().await.unwrap().to_json().unwrap();
    let mut pages = OrderedPageList::from_json(&listed).unwrap();
    assert_eq!(pages.len(), 4);

    // Drag b:2 above a:1, then drop a:2.
    let moved = PageReference::new(&b, 2);
    assert!(pages.move_to_drop_target(&moved, DropPosition::Before(0)));
    assert!(pages.remove(&PageReference::new(&a, 2)).is_some());

    let result = session.merge(None, None, Some(pages)).await.unwrap();

    assert_eq!(page_tags(&result.output_path), vec!["b:2", "a:1", "b:1"]);
}

#[tokio::test]
async fn test_repeated_page_is_emitted_each_time() {
    let temp_dir = TempDir::new().unwrap();
    let source = tagged_source(temp_dir.path(), "cover.pdf", 2);

    let order: OrderedPageList = vec![
        PageReference::new(source.path(), 1),
        PageReference::new(source.path(), 2),
        PageReference::new(source.path(), 1),
    ]
    .into();
    let output = temp_dir.path().join("repeated.pdf");

    Merger::new()
        .merge(MergeRequest::CustomOrder(order), Some(output.clone()), None)
        .await
        .unwrap();

    assert_eq!(page_tags(&output), vec!["cover:1", "cover:2", "cover:1"]);
}

#[tokio::test]
async fn test_custom_order_progress_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let a = tagged_source(temp_dir.path(), "a.pdf", 3);
    let b = tagged_source(temp_dir.path(), "b.pdf", 1);

    let mut pages = OrderedPageList::load_pages(&[a, b]).unwrap();
    let last = pages.get(3).cloned().unwrap();
    pages.move_page(&last, 0);

    let (tx, mut rx) = mpsc::unbounded_channel::<u8>();
    Merger::new()
        .merge(
            MergeRequest::new(vec![], Some(pages)),
            Some(temp_dir.path().join("progress.pdf")),
            Some(Arc::new(tx)),
        )
        .await
        .unwrap();

    let mut seen = Vec::new();
    while let Some(percent) = rx.recv().await {
        seen.push(percent);
    }
    assert_eq!(seen, vec![25, 50, 75, 100]);
}

#[tokio::test]
async fn test_custom_order_wins_over_file_list() {
    let temp_dir = TempDir::new().unwrap();
    let a = tagged_source(temp_dir.path(), "a.pdf", 1);
    let b = tagged_source(temp_dir.path(), "b.pdf", 1);
    let order: OrderedPageList = vec![PageReference::new(b.path(), 1)].into();
    let output = temp_dir.path().join("only_b.pdf");

    Merger::new()
        .merge(
            MergeRequest::new(vec![a, b], Some(order)),
            Some(output.clone()),
            None,
        )
        .await
        .unwrap();

    assert_eq!(page_tags(&output), vec!["b:1"]);
}
