//! フリーテキスト見積の抽出
//!
//! PDF・Word等から書き出したテキストやメール本文から、
//! 金額・通貨・語数をキーワード検索で抽出する。

use crate::types::TextQuote;
use regex::Regex;

lazy_static::lazy_static! {
    static ref AMOUNT_RE: Regex = Regex::new(r"(?i)(?:total|amount|price)[^\d]*(\d+[\d,.]*)").unwrap();
    static ref CURRENCY_RE: Regex = Regex::new(r"(?i)(?:currency|in)[\s:]*([A-Z]{3})").unwrap();
    static ref WORD_COUNT_RE: Regex = Regex::new(r"(?i)(?:word count|words)[^\d]*(\d+[\d,.]*)").unwrap();
}

/// テキストから見積情報を抽出
///
/// # Examples
/// ```
/// use quote_extract_common::extract_quote_from_text;
///
/// let quote = extract_quote_from_text("Word count: 4,000\nTotal amount: 1,000.00 (currency: EUR)");
/// assert_eq!(quote.quote_amount, Some(1000.0));
/// assert_eq!(quote.word_count, Some(4000));
/// assert_eq!(quote.currency.as_deref(), Some("EUR"));
/// assert_eq!(quote.unit_price, Some(0.25));
/// ```
pub fn extract_quote_from_text(text: &str) -> TextQuote {
    let quote_amount = AMOUNT_RE
        .captures(text)
        .and_then(|cap| strip_separators(&cap[1]).parse::<f64>().ok())
        .filter(|v| v.is_finite());

    // 通貨コードは大文字に揃える
    let currency = CURRENCY_RE
        .captures(text)
        .map(|cap| cap[1].to_uppercase());

    let word_count = WORD_COUNT_RE
        .captures(text)
        .and_then(|cap| parse_count(&cap[1]));

    let unit_price = match (quote_amount, word_count) {
        (Some(amount), Some(words)) if words > 0 => Some(amount / words as f64),
        _ => None,
    };

    TextQuote {
        quote_amount,
        currency,
        word_count,
        unit_price,
    }
}

fn strip_separators(raw: &str) -> String {
    raw.trim_end_matches('.').replace(',', "")
}

/// 語数は整数部のみ
fn parse_count(raw: &str) -> Option<u64> {
    let cleaned = strip_separators(raw);
    let integer = cleaned.split('.').next().unwrap_or_default();
    integer.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_fields() {
        let text = "Project quote\nWords: 5000\nTotal: 1,250.00 in USD";
        let quote = extract_quote_from_text(text);
        assert_eq!(quote.quote_amount, Some(1250.0));
        assert_eq!(quote.word_count, Some(5000));
        assert_eq!(quote.currency.as_deref(), Some("USD"));
        assert_eq!(quote.unit_price, Some(0.25));
    }

    #[test]
    fn test_price_keyword() {
        let quote = extract_quote_from_text("Price 300");
        assert_eq!(quote.quote_amount, Some(300.0));
        assert_eq!(quote.word_count, None);
        assert_eq!(quote.unit_price, None);
    }

    #[test]
    fn test_sentence_end_period() {
        let quote = extract_quote_from_text("The total is 880.");
        assert_eq!(quote.quote_amount, Some(880.0));
    }

    #[test]
    fn test_lowercase_currency() {
        let quote = extract_quote_from_text("currency: gbp");
        assert_eq!(quote.currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_zero_words_no_unit_price() {
        let quote = extract_quote_from_text("amount 100, word count 0");
        assert_eq!(quote.word_count, Some(0));
        assert_eq!(quote.unit_price, None);
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract_quote_from_text("Hello there"), TextQuote::default());
    }
}
