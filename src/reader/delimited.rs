//! CSV / TSV 読み込み

use crate::error::Result;
use quote_extract_common::Sheet;
use std::io::Read;
use std::path::Path;

/// 区切り文字付きファイルを読み込み
///
/// ヘッダー行は特別扱いせず、行ごとの列数の違いも許容する。
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Sheet> {
    let file = std::fs::File::open(path)?;
    let sheet = read_delimited_from(file, delimiter)?;
    tracing::debug!(path = %path.display(), rows = sheet.len(), "CSVを読み込み");
    Ok(sheet)
}

pub fn read_delimited_from<R: Read>(input: R, delimiter: u8) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| field.to_string()).collect::<Vec<String>>());
    }

    Ok(Sheet::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_flexible_rows() {
        let data = "Source,Target,Total\nEN,FR,100\n\"Grand Total\",\"$1,200.00\"\n";
        let sheet = read_delimited_from(data.as_bytes(), b',').unwrap();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.rows()[2], vec!["Grand Total", "$1,200.00"]);
    }

    #[test]
    fn test_read_tab_separated() {
        let data = "Source\tTarget\nEN\tJA\n";
        let sheet = read_delimited_from(data.as_bytes(), b'\t').unwrap();
        assert_eq!(sheet.rows()[1], vec!["EN", "JA"]);
    }
}
