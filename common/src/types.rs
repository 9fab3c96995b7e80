//! 抽出結果の型定義
//!
//! CLIとバッチ処理で共有される型:
//! - Sheet: デコード済みの表（行 × 文字列セル）
//! - ExtractionResult: スプレッドシート見積の抽出結果
//! - TextQuote: フリーテキスト見積の抽出結果

use serde::{Deserialize, Serialize};

/// 既定の通貨コード
pub const DEFAULT_CURRENCY: &str = "USD";

/// デコード済みの表
///
/// 行の長さは揃っていなくてよい。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for Sheet {
    fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
        Self {
            rows: iter
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// 行のセルを空白区切りで連結して小文字化
pub fn row_text(row: &[String]) -> String {
    row.join(" ").to_lowercase()
}

/// 行がすべて空白セルか
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// 見積金額をどのヒューリスティックで見つけたか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalSource {
    /// 集計中に見つけた Grand Total 行の末尾セル
    GrandTotalRow,
    /// Grand Total / USD 行の通貨記号付きセル
    CurrencyCell,
    /// Grand Total / USD 行の右端の数値セル
    TrailingNumber,
    /// "Grand Total in USD" 行の次の行
    NextRow,
    /// 最終行
    LastRow,
}

impl std::fmt::Display for TotalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TotalSource::GrandTotalRow => write!(f, "grand-total-row"),
            TotalSource::CurrencyCell => write!(f, "currency-cell"),
            TotalSource::TrailingNumber => write!(f, "trailing-number"),
            TotalSource::NextRow => write!(f, "next-row"),
            TotalSource::LastRow => write!(f, "last-row"),
        }
    }
}

/// スプレッドシート見積の抽出結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub quote_amount: f64,
    pub currency: String,
    pub word_count: f64,
    pub unit_price: f64,
    pub source_language: String,
    /// 出現順・重複なし
    pub target_languages: Vec<String>,
    pub weighted_count: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_source: Option<TotalSource>,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::with_currency(DEFAULT_CURRENCY)
    }
}

impl ExtractionResult {
    pub fn with_currency(currency: &str) -> Self {
        Self {
            quote_amount: 0.0,
            currency: currency.to_string(),
            word_count: 0.0,
            unit_price: 0.0,
            source_language: String::new(),
            target_languages: Vec::new(),
            weighted_count: 0.0,
            total_source: None,
        }
    }

    /// 見積金額が見つかったか
    pub fn has_amount(&self) -> bool {
        self.quote_amount > 0.0
    }
}

/// フリーテキスト見積の抽出結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextQuote {
    pub quote_amount: Option<f64>,
    pub currency: Option<String>,
    pub word_count: Option<u64>,
    pub unit_price: Option<f64>,
}
