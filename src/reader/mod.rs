//! 見積ファイルの読み込みと抽出
//!
//! ファイル形式（MIMEヒント優先、なければ拡張子）で読み込み方法を選び、
//! 表形式は `extract_with`、テキストは `extract_quote_from_text` で抽出する。

pub mod delimited;
pub mod workbook;

use crate::error::{QuoteError, Result};
use quote_extract_common::{extract_quote_from_text, extract_with, ExtractOptions, ExtractionResult, Sheet, TextQuote};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
pub const CSV_EXTENSIONS: &[&str] = &["csv", "tsv"];
pub const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// テキスト化してから渡す必要がある形式
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "odt", "rtf"];

/// 見積ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    Spreadsheet,
    Csv,
    Text,
}

impl FileKind {
    /// ファイル種類を判定
    ///
    /// MIMEヒントがあればそれを優先し、判定できなければ拡張子を見る。
    pub fn detect(path: &Path, mime: Option<&str>) -> Result<Self> {
        if let Some(mime) = mime {
            let mime = mime.to_lowercase();
            if mime.contains("excel") || mime.contains("spreadsheet") {
                return Ok(FileKind::Spreadsheet);
            }
            if mime.contains("csv") || mime.contains("tab-separated") {
                return Ok(FileKind::Csv);
            }
            if mime.starts_with("text/plain") {
                return Ok(FileKind::Text);
            }
            if mime.contains("pdf") || mime.contains("word") || mime.contains("document") {
                return Err(QuoteError::UnsupportedFileType(mime));
            }
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            Ok(FileKind::Spreadsheet)
        } else if CSV_EXTENSIONS.contains(&ext.as_str()) {
            Ok(FileKind::Csv)
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Ok(FileKind::Text)
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            Err(QuoteError::UnsupportedFileType(format!(
                "{}（テキストに変換してから指定してください）",
                path.display()
            )))
        } else {
            Err(QuoteError::UnsupportedFileType(path.display().to_string()))
        }
    }

    /// 対応する拡張子か
    pub fn is_supported_extension(ext: &str) -> bool {
        let ext = ext.to_lowercase();
        SPREADSHEET_EXTENSIONS
            .iter()
            .chain(CSV_EXTENSIONS)
            .chain(TEXT_EXTENSIONS)
            .any(|&e| e == ext)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Spreadsheet => write!(f, "spreadsheet"),
            FileKind::Csv => write!(f, "csv"),
            FileKind::Text => write!(f, "text"),
        }
    }
}

/// 読み込みオプション
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// ワークシートの位置（0始まり）
    pub sheet_index: usize,
    pub extract: ExtractOptions,
}

/// 抽出内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteContent {
    Sheet(ExtractionResult),
    Text(TextQuote),
}

/// ファイル単位の抽出結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQuote {
    pub file_name: String,
    pub file_path: String,
    pub kind: FileKind,
    pub quote: QuoteContent,
}

impl FileQuote {
    /// 見積金額が見つかったか
    pub fn has_amount(&self) -> bool {
        match &self.quote {
            QuoteContent::Sheet(r) => r.has_amount(),
            QuoteContent::Text(t) => t.quote_amount.is_some_and(|a| a > 0.0),
        }
    }

    pub fn quote_amount(&self) -> f64 {
        match &self.quote {
            QuoteContent::Sheet(r) => r.quote_amount,
            QuoteContent::Text(t) => t.quote_amount.unwrap_or_default(),
        }
    }

    pub fn word_count(&self) -> f64 {
        match &self.quote {
            QuoteContent::Sheet(r) => r.word_count,
            QuoteContent::Text(t) => t.word_count.map(|w| w as f64).unwrap_or_default(),
        }
    }

    pub fn unit_price(&self) -> f64 {
        match &self.quote {
            QuoteContent::Sheet(r) => r.unit_price,
            QuoteContent::Text(t) => t.unit_price.unwrap_or_default(),
        }
    }

    pub fn currency<'a>(&'a self, fallback: &'a str) -> &'a str {
        match &self.quote {
            QuoteContent::Sheet(r) => &r.currency,
            QuoteContent::Text(t) => t.currency.as_deref().unwrap_or(fallback),
        }
    }
}

/// ファイルを表として読み込み
pub fn read_sheet(path: &Path, kind: FileKind, sheet_index: usize) -> Result<Sheet> {
    match kind {
        FileKind::Spreadsheet => workbook::read_workbook(path, sheet_index),
        FileKind::Csv => {
            let tab = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
            delimited::read_delimited(path, if tab { b'\t' } else { b',' })
        }
        FileKind::Text => {
            let content = std::fs::read_to_string(path)?;
            Ok(content.lines().map(|line| vec![line.to_string()]).collect())
        }
    }
}

/// ファイルから見積を抽出
pub fn extract_file(path: &Path, mime: Option<&str>, options: &ReadOptions) -> Result<FileQuote> {
    if !path.exists() {
        return Err(QuoteError::FileNotFound(path.display().to_string()));
    }

    let kind = FileKind::detect(path, mime)?;
    tracing::debug!(path = %path.display(), %kind, "見積ファイルを読み込み");

    let quote = match kind {
        FileKind::Text => {
            let content = std::fs::read_to_string(path)?;
            QuoteContent::Text(extract_quote_from_text(&content))
        }
        FileKind::Spreadsheet | FileKind::Csv => {
            let sheet = read_sheet(path, kind, options.sheet_index)?;
            QuoteContent::Sheet(extract_with(&sheet, &options.extract))
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(FileQuote {
        file_name,
        file_path: path.display().to_string(),
        kind,
        quote,
    })
}
