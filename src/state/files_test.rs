use super::*;
use crate::api::{Backend, FileUpdate, FileUpload};
use crate::state::mock_backend::MockBackend;

fn record(id: &str, name: &str) -> FileRecord {
    FileRecord {
        file_id: id.into(),
        filename: name.into(),
        size: Some(1_258_291),
        num_chunks: Some(12),
        upload_time: Some("2024-06-09T10:00:00".into()),
        content_type: Some("application/pdf".into()),
        chunking_method: Some("auto".into()),
    }
}

#[tokio::test]
async fn upload_adds_and_selects_file() {
    let backend = MockBackend::new();
    let mut lib = FileLibrary::default();

    assert!(lib.begin_upload());
    assert!(!lib.begin_upload(), "second upload refused while busy");

    let result = backend
        .upload_file(FileUpload {
            filename: "notes.txt".into(),
            content_type: Some("text/plain".into()),
            bytes: b"hello".to_vec(),
        })
        .await;
    let id = lib.finish_upload(result);

    assert_eq!(id.as_deref(), Some("file-1"));
    assert!(!lib.uploading);
    let selected = lib.selected().unwrap();
    assert_eq!(selected.filename, "notes.txt");
    assert_eq!(selected.size, Some(5));
}

#[tokio::test]
async fn failed_upload_keeps_list_and_reports() {
    let backend = MockBackend::new();
    backend.fail_next(413, "File too large");
    let mut lib = FileLibrary { files: vec![record("a", "a.pdf")], ..Default::default() };

    lib.begin_upload();
    let result = backend
        .upload_file(FileUpload { filename: "big.pdf".into(), content_type: None, bytes: vec![] })
        .await;
    assert_eq!(lib.finish_upload(result), None);
    assert_eq!(lib.files.len(), 1);
    assert_eq!(lib.error.as_deref(), Some("File too large"));
}

#[test]
fn deleting_selected_file_clears_selection() {
    let mut lib = FileLibrary { files: vec![record("a", "a.pdf"), record("b", "b.pdf")], ..Default::default() };
    lib.select(Some("a".into()));
    assert!(!lib.remove("b"));
    assert!(lib.selected().is_some());
    assert!(lib.remove("a"));
    assert!(lib.selected().is_none());
    assert!(lib.files.is_empty());
}

#[tokio::test]
async fn rename_keeps_metadata_missing_from_response() {
    let backend = MockBackend::new();
    let mut lib = FileLibrary { files: vec![record("a", "a.pdf")], ..Default::default() };

    let updated = backend
        .update_file("a", &FileUpdate { filename: "anatomy.pdf".into() })
        .await
        .unwrap();
    lib.apply_updated(updated);

    let f = &lib.files[0];
    assert_eq!(f.filename, "anatomy.pdf");
    assert_eq!(f.num_chunks, Some(12));
    assert_eq!(f.content_type.as_deref(), Some("application/pdf"));
}

#[test]
fn sizes_are_human_readable() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1023), "1023 B");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_size(1_258_291), "1.2 MB");
    assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
}

#[test]
fn content_type_follows_extension() {
    assert_eq!(content_type_for("Report.PDF"), Some("application/pdf"));
    assert_eq!(content_type_for("notes.md"), Some("text/markdown"));
    assert_eq!(content_type_for("archive.tar.gz"), None);
    assert_eq!(content_type_for("README"), None);
}

#[test]
fn display_name_strips_directories() {
    assert_eq!(display_name("/home/ana/docs/cardio.pdf"), "cardio.pdf");
    assert_eq!(display_name(r"C:\Users\ana\cardio.pdf"), "cardio.pdf");
    assert_eq!(display_name("cardio.pdf"), "cardio.pdf");
}
