//! スプレッドシート見積の抽出
//!
//! ## 処理フロー
//! 1. ヘッダー行（Source / Target）の検出
//! 2. ヘッダー以降の行を集計（言語・語数・Grand Total）
//! 3. 金額が見つからなければ Grand Total / USD 行を下から探索
//! 4. それでもなければ最終行を探索
//! 5. 単価 = 金額 / 語数
//!
//! どの段階でも失敗はエラーにせず、既定値のまま返す。

use crate::header::{find_header, ColumnMap};
use crate::numeric::{is_numeric, parse_amount, parse_amount_like, parse_currency_cell};
use crate::types::{is_blank_row, row_text, ExtractionResult, Sheet, TotalSource, DEFAULT_CURRENCY};

/// 抽出オプション
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// 結果に設定する通貨コード
    pub currency: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// 既定オプションで抽出
pub fn extract(sheet: &Sheet) -> ExtractionResult {
    extract_with(sheet, &ExtractOptions::default())
}

/// 見積を抽出
pub fn extract_with(sheet: &Sheet, options: &ExtractOptions) -> ExtractionResult {
    let aggregate = match find_header(sheet) {
        Some(header) => {
            tracing::debug!(row = header.row, loose = header.loose, columns = ?header.columns, "ヘッダー行を検出");
            sheet.rows()[header.row + 1..]
                .iter()
                .fold(Aggregate::default(), |acc, row| acc.absorb(row, &header.columns))
        }
        None => {
            tracing::debug!("ヘッダー行が見つかりません");
            Aggregate::default()
        }
    };

    let total = aggregate
        .grand_total
        .map(|amount| (amount, TotalSource::GrandTotalRow))
        .or_else(|| FALLBACKS.iter().find_map(|fallback| fallback(sheet)));

    if let Some((amount, source)) = total {
        tracing::debug!(amount, %source, "見積金額を検出");
    }

    let (quote_amount, total_source) = match total {
        Some((amount, source)) => (amount, Some(source)),
        None => (0.0, None),
    };

    let unit_price = if aggregate.word_count > 0.0 && quote_amount > 0.0 {
        quote_amount / aggregate.word_count
    } else {
        0.0
    };

    ExtractionResult {
        quote_amount,
        currency: options.currency.clone(),
        word_count: aggregate.word_count,
        unit_price,
        source_language: aggregate.source_language,
        target_languages: aggregate.target_languages,
        weighted_count: aggregate.weighted_count,
        total_source,
    }
}

/// 行集計の途中状態
#[derive(Debug, Default)]
struct Aggregate {
    source_language: String,
    target_languages: Vec<String>,
    word_count: f64,
    weighted_count: f64,
    grand_total: Option<f64>,
}

impl Aggregate {
    fn absorb(mut self, row: &[String], columns: &ColumnMap) -> Self {
        if columns.max_index().is_some_and(|max| row.len() < max) {
            return self;
        }

        // Grand Total 行は言語・語数に含めない
        if row_text(row).contains("grand total") {
            if self.grand_total.is_none() {
                self.grand_total = row.last().and_then(|c| positive(parse_amount(c)));
            }
            return self;
        }

        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
        };

        if self.source_language.is_empty() {
            if let Some(source) = cell(columns.source) {
                self.source_language = source.to_string();
            }
        }

        if let Some(target) = cell(columns.target) {
            if !self.target_languages.iter().any(|t| t == target) {
                self.target_languages.push(target.to_string());
            }
        }

        if let Some(words) = cell(columns.total).and_then(parse_amount) {
            self.word_count += words;
        }

        if let Some(weighted) = cell(columns.weighted).and_then(parse_amount) {
            self.weighted_count += weighted;
        }

        self
    }
}

/// Grand Total / USD 行に対する探索方法（試行順）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalStrategy {
    /// 通貨記号を含むセル（左から）
    CurrencyCell,
    /// 数値らしいセル（右から）
    TrailingNumber,
    /// "grand total in usd" 行の次の行
    NextRow,
}

impl TotalStrategy {
    pub const ORDER: [TotalStrategy; 3] = [
        TotalStrategy::CurrencyCell,
        TotalStrategy::TrailingNumber,
        TotalStrategy::NextRow,
    ];

    /// `index` 行目に対して探索
    pub fn apply(self, sheet: &Sheet, index: usize) -> Option<f64> {
        let row = sheet.row(index)?;
        let found = match self {
            TotalStrategy::CurrencyCell => row.iter().find_map(|c| parse_currency_cell(c)),
            TotalStrategy::TrailingNumber => row
                .iter()
                .rev()
                .filter(|c| is_numeric(c))
                .find_map(|c| parse_amount(c)),
            TotalStrategy::NextRow => {
                if !row_text(row).contains("grand total in usd") {
                    return None;
                }
                sheet
                    .row(index + 1)?
                    .iter()
                    .find_map(|c| parse_amount_like(c))
            }
        };
        positive(found)
    }

    pub fn source(self) -> TotalSource {
        match self {
            TotalStrategy::CurrencyCell => TotalSource::CurrencyCell,
            TotalStrategy::TrailingNumber => TotalSource::TrailingNumber,
            TotalStrategy::NextRow => TotalSource::NextRow,
        }
    }
}

type Fallback = fn(&Sheet) -> Option<(f64, TotalSource)>;

/// 集計で金額が見つからなかった場合の探索（試行順）
const FALLBACKS: &[Fallback] = &[grand_total_fallback, last_row_fallback];

/// Grand Total / USD を含む行を下から探索
fn grand_total_fallback(sheet: &Sheet) -> Option<(f64, TotalSource)> {
    (0..sheet.len())
        .rev()
        .filter(|&i| {
            let text = row_text(&sheet.rows()[i]);
            text.contains("grand total") || text.contains("usd")
        })
        .find_map(|i| {
            TotalStrategy::ORDER
                .iter()
                .find_map(|s| s.apply(sheet, i).map(|amount| (amount, s.source())))
        })
}

/// 最終行（空行を除く）を左から探索
fn last_row_fallback(sheet: &Sheet) -> Option<(f64, TotalSource)> {
    let row = sheet.rows().iter().rev().find(|r| !is_blank_row(r))?;
    positive(row.iter().find_map(|c| parse_amount_like(c))).map(|amount| (amount, TotalSource::LastRow))
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}
