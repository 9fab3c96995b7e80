//! Excel / ODS 読み込み（calamine）

use crate::error::{QuoteError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use quote_extract_common::Sheet;
use std::path::Path;

/// ワークブックの指定シートを読み込み
pub fn read_workbook(path: &Path, sheet_index: usize) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| QuoteError::Workbook(format!("{}: {}", path.display(), e)))?;

    let sheet_count = workbook.sheet_names().len();
    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| {
            QuoteError::SheetNotFound(format!(
                "{} ({}番目, シート数 {})",
                path.display(),
                sheet_index,
                sheet_count
            ))
        })?
        .map_err(|e| QuoteError::Workbook(format!("{}: {}", path.display(), e)))?;

    let sheet = range_to_sheet(&range);
    tracing::debug!(path = %path.display(), rows = sheet.len(), "ワークシートを読み込み");
    Ok(sheet)
}

/// セル範囲を文字列の表に変換
pub fn range_to_sheet(range: &Range<Data>) -> Sheet {
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>())
        .collect()
}
