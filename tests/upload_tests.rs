use bytes::Bytes;
use knowledge_bank::upload::UploadSink;

fn test_sink() -> (tempfile::TempDir, UploadSink) {
    let dir = tempfile::tempdir().unwrap();
    let sink = UploadSink::new(dir.path().join("uploads")).unwrap();
    (dir, sink)
}

#[tokio::test]
async fn test_store_writes_payload() {
    let (dir, sink) = test_sink();

    let stored = sink
        .store("report.pdf", Bytes::from_static(b"pdf bytes"))
        .await
        .unwrap();

    assert_eq!(stored, "report.pdf");
    let written = std::fs::read(dir.path().join("uploads").join("report.pdf")).unwrap();
    assert_eq!(written, b"pdf bytes");
}

#[tokio::test]
async fn test_collision_appends_counter_before_extension() {
    let (dir, sink) = test_sink();

    let first = sink
        .store("report.pdf", Bytes::from_static(b"first"))
        .await
        .unwrap();
    let second = sink
        .store("report.pdf", Bytes::from_static(b"second"))
        .await
        .unwrap();
    let third = sink
        .store("report.pdf", Bytes::from_static(b"third"))
        .await
        .unwrap();

    assert_eq!(first, "report.pdf");
    assert_eq!(second, "report_1.pdf");
    assert_eq!(third, "report_2.pdf");

    // Earlier uploads are untouched
    let uploads = dir.path().join("uploads");
    assert_eq!(std::fs::read(uploads.join("report.pdf")).unwrap(), b"first");
    assert_eq!(
        std::fs::read(uploads.join("report_1.pdf")).unwrap(),
        b"second"
    );
    assert_eq!(
        std::fs::read(uploads.join("report_2.pdf")).unwrap(),
        b"third"
    );
}

#[tokio::test]
async fn test_counter_skips_existing_suffixed_names() {
    let (dir, sink) = test_sink();
    let uploads = dir.path().join("uploads");
    std::fs::write(uploads.join("report.pdf"), b"existing").unwrap();
    std::fs::write(uploads.join("report_1.pdf"), b"existing").unwrap();
    std::fs::write(uploads.join("report_2.pdf"), b"existing").unwrap();

    let stored = sink
        .store("report.pdf", Bytes::from_static(b"new"))
        .await
        .unwrap();

    assert_eq!(stored, "report_3.pdf");
}

#[tokio::test]
async fn test_extensionless_names_get_plain_suffix() {
    let (_dir, sink) = test_sink();

    let first = sink.store("README", Bytes::from_static(b"a")).await.unwrap();
    let second = sink.store("README", Bytes::from_static(b"b")).await.unwrap();

    assert_eq!(first, "README");
    assert_eq!(second, "README_1");
}

#[tokio::test]
async fn test_traversal_name_stays_inside_upload_dir() {
    let (dir, sink) = test_sink();

    let stored = sink
        .store("../../evil.txt", Bytes::from_static(b"payload"))
        .await
        .unwrap();

    assert_eq!(stored, "evil.txt");
    assert!(dir.path().join("uploads").join("evil.txt").exists());
    // Nothing escaped the upload directory
    assert!(!dir.path().join("evil.txt").exists());
}

#[tokio::test]
async fn test_windows_style_client_path_is_reduced_to_leaf() {
    let (dir, sink) = test_sink();

    let stored = sink
        .store("C:\\Users\\me\\report.pdf", Bytes::from_static(b"x"))
        .await
        .unwrap();

    assert_eq!(stored, "report.pdf");
    assert!(dir.path().join("uploads").join("report.pdf").exists());
}

#[tokio::test]
async fn test_empty_original_name_still_stores() {
    let (dir, sink) = test_sink();

    let stored = sink.store("", Bytes::from_static(b"anon")).await.unwrap();

    // The bare directory path counts as an existing entry, so the first
    // probe already carries a counter.
    assert_eq!(stored, "_1");
    assert_eq!(
        std::fs::read(dir.path().join("uploads").join("_1")).unwrap(),
        b"anon"
    );
}

#[tokio::test]
async fn test_new_creates_upload_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("var").join("uploads");

    let _sink = UploadSink::new(&nested).unwrap();
    assert!(nested.is_dir());
}
