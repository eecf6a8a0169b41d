//! Integration tests for whole-file merges.

use pdfmerger::io::PdfWriter;
use pdfmerger::merge::{MergeRequest, Merger, merge_pdfs};
use pdfmerger::session::MergeSession;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

use crate::common::{all_pages_have_media_box, page_tags, tagged_source, write_tagged_pdf};

#[tokio::test]
async fn test_merge_two_files_in_list_order() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        tagged_source(temp_dir.path(), "first.pdf", 2),
        tagged_source(temp_dir.path(), "second.pdf", 3),
    ];
    let output = temp_dir.path().join("merged.pdf");

    let path = merge_pdfs(files, Some(output.clone()), None, None)
        .await
        .expect("Merge failed");

    assert_eq!(path, output);
    assert_eq!(
        page_tags(&path),
        vec![
            "first:1", "first:2", "second:1", "second:2", "second:3"
        ]
    );
    assert!(all_pages_have_media_box(&path));
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let source = tagged_source(temp_dir.path(), "twice.pdf", 2);
    let output = temp_dir.path().join("twice_merged.pdf");

    merge_pdfs(vec![source.clone(), source], Some(output.clone()), None, None)
        .await
        .unwrap();

    assert_eq!(
        page_tags(&output),
        vec!["twice:1", "twice:2", "twice:1", "twice:2"]
    );
}

#[tokio::test]
async fn test_unnamed_outputs_do_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    let files = vec![
        tagged_source(temp_dir.path(), "a.pdf", 1),
        tagged_source(temp_dir.path(), "b.pdf", 1),
    ];
    let merger = Merger::new().with_output_dir(&out_dir);

    let first = merger
        .merge(MergeRequest::WholeFiles(files.clone()), None, None)
        .await
        .unwrap();
    let second = merger
        .merge(MergeRequest::WholeFiles(files), None, None)
        .await
        .unwrap();

    assert_eq!(first.output_path, out_dir.join("Merged_1.pdf"));
    assert_eq!(second.output_path, out_dir.join("Merged_2.pdf"));
    assert!(first.output_path.exists());
    assert!(second.output_path.exists());
}

#[tokio::test]
async fn test_progress_reaches_one_hundred() {
    let temp_dir = TempDir::new().unwrap();
    let files: Vec<_> = ["a.pdf", "b.pdf", "c.pdf", "d.pdf"]
        .iter()
        .map(|name| tagged_source(temp_dir.path(), name, 1))
        .collect();
    let (tx, mut rx) = mpsc::unbounded_channel::<u8>();
    let merger = Merger::new().with_writer(PdfWriter::without_compression());

    let result = merger
        .merge(
            MergeRequest::WholeFiles(files),
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
    assert_eq!(result.statistics.files_merged, 4);
    assert_eq!(result.statistics.total_pages, 4);
    assert!(!result.statistics.compressed);
    assert!(result.statistics.output_size > 0);
}

#[tokio::test]
async fn test_session_merge_after_reordering_files() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_tagged_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_tagged_pdf(temp_dir.path(), "b.pdf", 2);
    let c = write_tagged_pdf(temp_dir.path(), "c.pdf", 1);

    let mut session = MergeSession::with_merger(Merger::new().with_output_dir(temp_dir.path()));
    assert_eq!(session.add_files([&a, &b, &c]).unwrap(), 3);
    assert!(session.move_down(0));
    assert!(session.remove_file(2).is_some());
    assert!(session.can_merge());

    let result = session.merge(None, None, None).await.unwrap();

    assert_eq!(result.output_path, temp_dir.path().join("Merged_1.pdf"));
    assert_eq!(page_tags(&result.output_path), vec!["b:1", "b:2", "a:1"]);
    assert!(!session.is_merging());
}
