//! ヘッダー行の検出と列位置の特定
//!
//! 優先順位:
//! 1. "Source" と "Target" のセルを完全一致で含む最初の行
//! 2. 行テキスト（小文字化）に "source" と "target" を含む最初の行

use crate::types::{row_text, Sheet};

/// 列位置（見つからない列は None）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub source: Option<usize>,
    pub target: Option<usize>,
    pub total: Option<usize>,
    pub weighted: Option<usize>,
}

impl ColumnMap {
    /// 完全一致で列位置を特定
    pub fn exact(header: &[String]) -> Self {
        let find = |label: &str| header.iter().position(|c| c == label);
        Self {
            source: find("Source"),
            target: find("Target"),
            total: find("Total"),
            weighted: find("Weighted"),
        }
    }

    /// 完全一致を優先し、なければ大文字小文字を無視した部分一致で特定
    ///
    /// Total 列は Weighted 列と同じ位置を選ばない。
    pub fn loose(header: &[String]) -> Self {
        let exact = Self::exact(header);
        let lowered: Vec<String> = header.iter().map(|c| c.to_lowercase()).collect();
        let contains = |needle: &str, skip: Option<usize>| {
            lowered
                .iter()
                .enumerate()
                .find(|(i, c)| Some(*i) != skip && c.contains(needle))
                .map(|(i, _)| i)
        };

        let source = exact.source.or_else(|| contains("source", None));
        let target = exact.target.or_else(|| contains("target", None));
        let weighted = exact.weighted.or_else(|| contains("weighted", None));
        let total = exact.total.or_else(|| contains("total", weighted));

        Self { source, target, total, weighted }
    }

    /// 必要な列位置の最大値
    pub fn max_index(&self) -> Option<usize> {
        [self.source, self.target, self.total, self.weighted]
            .into_iter()
            .flatten()
            .max()
    }
}

/// ヘッダー検出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// ヘッダー行の位置
    pub row: usize,
    /// 列位置
    pub columns: ColumnMap,
    /// 部分一致による検出か
    pub loose: bool,
}

/// ヘッダー行を検出
pub fn find_header(sheet: &Sheet) -> Option<HeaderMatch> {
    let rows = sheet.rows();

    let exact = rows.iter().position(|row| {
        row.iter().any(|c| c == "Source") && row.iter().any(|c| c == "Target")
    });
    if let Some(index) = exact {
        return Some(HeaderMatch {
            row: index,
            columns: ColumnMap::exact(&rows[index]),
            loose: false,
        });
    }

    rows.iter()
        .position(|row| {
            let text = row_text(row);
            text.contains("source") && text.contains("target")
        })
        .map(|index| HeaderMatch {
            row: index,
            columns: ColumnMap::loose(&rows[index]),
            loose: true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<&str>>) -> Sheet {
        rows.into_iter().collect()
    }

    #[test]
    fn test_find_header_exact() {
        let s = sheet(vec![
            vec!["Quote #42"],
            vec!["Source", "Target", "Total", "Weighted"],
            vec!["EN", "FR", "100", "50"],
        ]);
        let header = find_header(&s).unwrap();
        assert_eq!(header.row, 1);
        assert!(!header.loose);
        assert_eq!(header.columns.source, Some(0));
        assert_eq!(header.columns.weighted, Some(3));
        assert_eq!(header.columns.max_index(), Some(3));
    }

    #[test]
    fn test_find_header_loose() {
        let s = sheet(vec![
            vec!["File", "Source Language", "Target Language", "Weighted Total", "Total Words"],
            vec!["a.docx", "EN", "FR", "50", "100"],
        ]);
        let header = find_header(&s).unwrap();
        assert!(header.loose);
        assert_eq!(header.columns.source, Some(1));
        assert_eq!(header.columns.target, Some(2));
        assert_eq!(header.columns.weighted, Some(3));
        assert_eq!(header.columns.total, Some(4));
    }

    #[test]
    fn test_exact_header_wins_over_earlier_loose_row() {
        let s = sheet(vec![
            vec!["source and target languages below"],
            vec!["Source", "Target"],
        ]);
        let header = find_header(&s).unwrap();
        assert_eq!(header.row, 1);
        assert!(!header.loose);
    }

    #[test]
    fn test_missing_columns() {
        let s = sheet(vec![vec!["Source", "Target"]]);
        let header = find_header(&s).unwrap();
        assert_eq!(header.columns.total, None);
        assert_eq!(header.columns.weighted, None);
        assert_eq!(header.columns.max_index(), Some(1));
    }

    #[test]
    fn test_no_header() {
        let s = sheet(vec![vec!["Language", "Words"], vec!["EN", "100"]]);
        assert!(find_header(&s).is_none());
    }
}
