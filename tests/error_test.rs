//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use quote_extract::error::QuoteError;
use quote_extract::{extract_file, scanner, ReadOptions};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result.unwrap_err(), QuoteError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.unwrap().is_empty());
}

/// 存在しないファイルを抽出した場合
#[test]
fn test_extract_missing_file() {
    let result = extract_file(Path::new("/nonexistent/quote.xlsx"), None, &ReadOptions::default());
    assert!(matches!(result, Err(QuoteError::FileNotFound(_))));
}

/// PDFは未対応
#[test]
fn test_extract_pdf_unsupported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quote.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let result = extract_file(&path, None, &ReadOptions::default());
    assert!(matches!(result, Err(QuoteError::UnsupportedFileType(_))));
}

/// 壊れたxlsxはワークブックエラー
#[test]
fn test_extract_corrupt_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let result = extract_file(&path, None, &ReadOptions::default());
    assert!(matches!(result, Err(QuoteError::Workbook(_))));
}

/// QuoteErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        QuoteError::Config("テスト設定エラー".to_string()),
        QuoteError::FileNotFound("quote.xlsx".to_string()),
        QuoteError::FolderNotFound("/path/to/folder".to_string()),
        QuoteError::UnsupportedFileType("quote.pdf".to_string()),
        QuoteError::Workbook("壊れたファイル".to_string()),
        QuoteError::SheetNotFound("quote.xlsx".to_string()),
        QuoteError::Export("出力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: QuoteError = io_err.into();

    assert!(matches!(err, QuoteError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: QuoteError = json_err.into();

    assert!(matches!(err, QuoteError::JsonParse(_)));
}
