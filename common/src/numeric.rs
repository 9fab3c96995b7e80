//! セル値の数値解釈
//!
//! 数字と `.` 以外をすべて除去し、先頭から数値として読める最長部分を
//! `f64` として解釈する（`842.21.` → 842.21, `1.2.3` → 1.2）。
//! 解釈できない値はエラーではなく `None`。

use regex::Regex;

/// 通貨記号
pub const CURRENCY_SIGNS: &[char] = &['$', '€', '£', '¥'];

/// セルを金額・数量として解釈
///
/// # Examples
/// ```
/// use quote_extract_common::numeric::parse_amount;
///
/// assert_eq!(parse_amount("$1,234.50"), Some(1234.5));
/// assert_eq!(parse_amount("n/a"), None);
/// ```
pub fn parse_amount(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let prefix = numeric_prefix(&cleaned);
    if prefix.is_empty() || prefix == "." {
        return None;
    }

    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `\d*\.?\d*` に一致する先頭部分
fn numeric_prefix(cleaned: &str) -> &str {
    let integer = cleaned.bytes().take_while(|b| b.is_ascii_digit()).count();
    let rest = &cleaned[integer..];
    if !rest.starts_with('.') {
        return &cleaned[..integer];
    }
    let fraction = rest[1..].bytes().take_while(|b| b.is_ascii_digit()).count();
    &cleaned[..integer + 1 + fraction]
}

/// 通貨記号を含むか
pub fn has_currency_sign(cell: &str) -> bool {
    cell.contains(CURRENCY_SIGNS)
}

/// 数値らしいセルか（`1,200` / `842.21` / `$ 500`）
pub fn is_numeric(cell: &str) -> bool {
    lazy_static::lazy_static! {
        static ref NUMERIC_RE: Regex = Regex::new(r"^[$€£¥]?\s*\d[\d,]*(\.\d+)?$").unwrap();
    }

    NUMERIC_RE.is_match(cell.trim())
}

/// 通貨記号付きセルを金額として解釈
pub fn parse_currency_cell(cell: &str) -> Option<f64> {
    if has_currency_sign(cell) {
        parse_amount(cell)
    } else {
        None
    }
}

/// 通貨記号付き、または数値らしいセルを金額として解釈
pub fn parse_amount_like(cell: &str) -> Option<f64> {
    if has_currency_sign(cell) || is_numeric(cell) {
        parse_amount(cell)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_symbols() {
        assert_eq!(parse_amount("$842.21"), Some(842.21));
        assert_eq!(parse_amount("1,200"), Some(1200.0));
        assert_eq!(parse_amount(" 300 words"), Some(300.0));
        assert_eq!(parse_amount("€ 99"), Some(99.0));
    }

    #[test]
    fn test_parse_amount_not_found() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("Grand Total"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("..5"), None);
    }

    #[test]
    fn test_parse_amount_longest_prefix() {
        assert_eq!(parse_amount("$842.21."), Some(842.21));
        assert_eq!(parse_amount("1.2.3"), Some(1.2));
        assert_eq!(parse_amount("500."), Some(500.0));
        assert_eq!(parse_amount(".75"), Some(0.75));
    }

    #[test]
    fn test_has_currency_sign() {
        assert!(has_currency_sign("$500"));
        assert!(has_currency_sign("£12"));
        assert!(has_currency_sign("¥1000"));
        assert!(!has_currency_sign("USD 500"));
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("842.21"));
        assert!(is_numeric("1,200"));
        assert!(is_numeric(" 500 "));
        assert!(is_numeric("$ 500"));
        assert!(!is_numeric("EN"));
        assert!(!is_numeric("500 words"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn test_parse_amount_like() {
        assert_eq!(parse_amount_like("$500"), Some(500.0));
        assert_eq!(parse_amount_like("750"), Some(750.0));
        assert_eq!(parse_amount_like("Total 750"), None);
        assert_eq!(parse_currency_cell("750"), None);
    }
}
