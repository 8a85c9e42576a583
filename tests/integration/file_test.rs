//! Integration tests for upload, listing, and download.

mod helpers;

use http::{StatusCode, header};

use helpers::MultipartForm;

#[tokio::test]
async fn test_upload_and_download_round_trip() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let upload = app
        .upload("docs/2024", "report.txt", b"quarterly numbers", false, &token)
        .await;
    assert_eq!(upload.status, StatusCode::OK, "{:?}", upload.body);
    assert_eq!(
        upload.body["data"]["message"],
        "File 'report.txt' uploaded successfully to 'docs/2024'."
    );

    let download = app
        .get_raw(
            "/api/files/download?folderPath=docs/2024&fileName=report.txt",
            Some(&token),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(
        download.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        download.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.txt\""
    );
    assert_eq!(download.headers[header::CONTENT_LENGTH], "17");
    assert_eq!(&download.body[..], b"quarterly numbers");
}

#[tokio::test]
async fn test_upload_conflict_keeps_original() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    app.upload("docs", "a.txt", b"A", false, &token).await;
    let second = app.upload("docs", "a.txt", b"B", false, &token).await;

    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
    assert_eq!(second.body["message"], "File 'a.txt' already exists in 'docs'.");

    let download = app
        .get_raw("/api/files/download?folder_path=docs&file_name=a.txt", Some(&token))
        .await;
    assert_eq!(&download.body[..], b"A");
}

#[tokio::test]
async fn test_upload_overwrite_replaces() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    app.upload("docs", "a.txt", b"first version", false, &token).await;
    let second = app.upload("docs", "a.txt", b"B", true, &token).await;
    assert_eq!(second.status, StatusCode::OK);

    let download = app
        .get_raw("/api/files/download?folderPath=docs&fileName=a.txt", Some(&token))
        .await;
    assert_eq!(&download.body[..], b"B");
}

#[tokio::test]
async fn test_upload_too_large() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let data = vec![0u8; 2 * 1024 * 1024];
    let response = app.upload("docs", "big.bin", &data, false, &token).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "File size exceeded. Maximum allowed size is 1 megabytes."
    );
    assert!(!app.root.path().join("docs/big.bin").exists());
}

#[tokio::test]
async fn test_oversized_file_part_rejected_before_rest_of_form() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let data = vec![1u8; 2 * 1024 * 1024];
    let response = app
        .upload_form(
            MultipartForm::new()
                .file("File", "big.bin", &data)
                .text("FolderPath", "docs")
                .text("FileName", "big.bin"),
            false,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "File size exceeded. Maximum allowed size is 1 megabytes."
    );
    assert!(!app.root.path().join("docs").exists());
}

#[tokio::test]
async fn test_upload_validation_messages() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let no_file = app
        .upload_form(
            MultipartForm::new().text("FileName", "a.txt").text("FolderPath", "docs"),
            false,
            Some(&token),
        )
        .await;
    assert_eq!(no_file.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_file.body["message"], "Please provide a file to upload.");

    let no_name = app
        .upload_form(
            MultipartForm::new()
                .text("FolderPath", "docs")
                .file("File", "a.txt", b"x"),
            false,
            Some(&token),
        )
        .await;
    assert_eq!(no_name.body["message"], "Please provide a file name.");

    let no_folder = app
        .upload_form(
            MultipartForm::new()
                .text("file_name", "a.txt")
                .file("file", "a.txt", b"x"),
            false,
            Some(&token),
        )
        .await;
    assert_eq!(no_folder.body["message"], "Please provide a folder path.");
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = helpers::TestApp::new().await;

    let form = MultipartForm::new()
        .text("FileName", "a.txt")
        .text("FolderPath", "docs")
        .file("File", "a.txt", b"x");
    let response = app.upload_form(form, false, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(!app.root.path().join("docs").exists());
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let upload = app.upload("../escape", "evil.txt", b"x", true, &token).await;
    assert_eq!(upload.status, StatusCode::BAD_REQUEST);
    assert!(!app.root.path().parent().unwrap().join("escape").exists());

    let list = app
        .request("GET", "/api/files/list?folderPath=/etc", None, Some(&token))
        .await;
    assert_eq!(list.status, StatusCode::BAD_REQUEST);

    let download = app
        .get_raw(
            "/api/files/download?folderPath=docs&fileName=..%2F..%2Fsecret",
            Some(&token),
        )
        .await;
    assert_eq!(download.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_files_flat_and_recursive() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    app.upload("data", "b.txt", b"b", false, &token).await;
    app.upload("data", "a.txt", b"a", false, &token).await;
    app.upload("data/c", "inner.txt", b"c", false, &token).await;

    let flat = app
        .request("GET", "/api/files/list?folderPath=data", None, Some(&token))
        .await;
    assert_eq!(flat.status, StatusCode::OK);
    assert_eq!(
        flat.body["data"],
        serde_json::json!({ "name": "data", "files": ["a.txt", "b.txt"], "folders": [] })
    );

    let deep = app
        .request(
            "GET",
            "/api/files/list?folderPath=data&includeSubfolders=true",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        deep.body["data"]["folders"],
        serde_json::json!([{ "name": "c", "files": ["inner.txt"], "folders": [] }])
    );
}

#[tokio::test]
async fn test_list_missing_folder() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let missing = app
        .request("GET", "/api/files/list?folderPath=nope", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(
        missing.body["message"],
        "The provided folder path does not exist."
    );

    let empty = app
        .request("GET", "/api/files/list", None, Some(&token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["message"], "Please provide a folder path.");
}

#[tokio::test]
async fn test_download_missing_file() {
    let app = helpers::TestApp::new().await;
    let token = app.login().await;

    let response = app
        .request(
            "GET",
            "/api/files/download?folderPath=reports&fileName=missing.pdf",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        "File 'missing.pdf' not found in 'reports'."
    );

    let incomplete = app
        .request("GET", "/api/files/download?folderPath=reports", None, Some(&token))
        .await;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        incomplete.body["message"],
        "Please provide a valid file path and file name."
    );
}
