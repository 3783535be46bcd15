//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use gallery_sync::error::GallerySyncError;
use gallery_sync::scanner;
use std::path::Path;
use tempfile::tempdir;

fn extensions() -> Vec<String> {
    vec!["jpg".to_string(), "png".to_string()]
}

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_category(Path::new("/nonexistent/path/12345"), &extensions());

    let err = result.unwrap_err();
    assert!(matches!(err, GallerySyncError::FolderNotFound(_)));
}

/// 画像のないフォルダは空のVecを返す
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_category(dir.path(), &extensions());
    assert!(result.unwrap().is_empty());
}

/// GallerySyncErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        GallerySyncError::Config("テスト設定エラー".to_string()),
        GallerySyncError::IndexNotFound("gallery-index.json".to_string()),
        GallerySyncError::CategoryNotFound("PH7".to_string()),
        GallerySyncError::FolderNotFound("/path/to/folder".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// スナップショットエラーはパスと原因を含む
#[test]
fn test_snapshot_error_message() {
    let err = GallerySyncError::Snapshot {
        path: "gallery-index.json.backup_20250101_000000".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
    };
    let display = format!("{}", err);

    assert!(display.contains("backup_20250101_000000"));
    assert!(display.contains("access denied"));
    assert!(std::error::Error::source(&err).is_some());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: GallerySyncError = io_err.into();

    assert!(matches!(err, GallerySyncError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: GallerySyncError = json_err.into();

    assert!(matches!(err, GallerySyncError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = gallery_sync_common::Error::Format("書式エラー".to_string());
    let err: GallerySyncError = common_err.into();

    assert!(matches!(err, GallerySyncError::Common(_)));
    assert!(format!("{}", err).contains("書式エラー"));
}
