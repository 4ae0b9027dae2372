//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use name_xref::error::NameXrefError;
use name_xref::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, NameXrefError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// NameXrefErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        NameXrefError::Config("テスト設定エラー".to_string()),
        NameXrefError::FolderNotFound("/path/to/folder".to_string()),
        NameXrefError::ExcelRead("読み込みエラー".to_string()),
        NameXrefError::ExcelGeneration("Excel生成エラー".to_string()),
        NameXrefError::InvalidSheetName("a/b".to_string()),
        NameXrefError::SheetExists("SRW→SRD".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// SheetExistsエラーのメッセージ確認
#[test]
fn test_sheet_exists_message() {
    let err = NameXrefError::SheetExists("SRW→SRD".to_string());
    let display = format!("{}", err);

    assert!(display.contains("SRW→SRD"));
    assert!(display.contains("--on-conflict"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = NameXrefError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: NameXrefError = io_err.into();

    assert!(matches!(err, NameXrefError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: NameXrefError = json_err.into();

    assert!(matches!(err, NameXrefError::JsonParse(_)));
}

/// 走査エラーからの変換
#[test]
fn test_walk_error_conversion() {
    let walk_err = walkdir::WalkDir::new("/nonexistent/path/12345")
        .into_iter()
        .find_map(|e| e.err())
        .expect("走査エラーが発生しない");
    let err: NameXrefError = walk_err.into();

    assert!(matches!(err, NameXrefError::Walk(_)));
    assert!(format!("{}", err).contains("走査"));
}
