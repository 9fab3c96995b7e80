//! Excelレポート生成
//!
//! 1行1ファイルの一覧表と、語数・金額の合計行を出力する。
//! 金額の合計は既定通貨の行だけを対象にする。

use crate::batch::BatchFailure;
use crate::error::{QuoteError, Result};
use crate::reader::{FileQuote, QuoteContent};
use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

const HEADERS: &[(&str, f64)] = &[
    ("File", 28.0),
    ("Kind", 12.0),
    ("Source", 10.0),
    ("Targets", 24.0),
    ("Words", 12.0),
    ("Weighted", 12.0),
    ("Amount", 14.0),
    ("Currency", 10.0),
    ("Unit price", 12.0),
    ("Found by", 16.0),
];

fn to_export_error(e: XlsxError) -> QuoteError {
    QuoteError::Export(format!("Excel生成エラー: {}", e))
}

pub fn generate_excel(
    quotes: &[FileQuote],
    failures: &[BatchFailure],
    output_path: &Path,
    title: &str,
    default_currency: &str,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Quotes").map_err(to_export_error)?;
    write_quotes(worksheet, quotes, title, default_currency).map_err(to_export_error)?;

    if !failures.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Failures").map_err(to_export_error)?;
        write_failures(worksheet, failures).map_err(to_export_error)?;
    }

    workbook.save(output_path).map_err(to_export_error)?;
    Ok(())
}

fn write_quotes(
    worksheet: &mut Worksheet,
    quotes: &[FileQuote],
    title: &str,
    default_currency: &str,
) -> std::result::Result<(), XlsxError> {
    let title_format = Format::new().set_bold().set_font_size(14.0);
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let number_format = Format::new().set_num_format("#,##0.##");
    let money_format = Format::new().set_num_format("#,##0.00");
    let total_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    worksheet.write_string_with_format(0, 0, title, &title_format)?;

    let header_row = 2;
    for (col, (label, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_string_with_format(header_row, col, *label, &header_format)?;
    }

    let mut row = header_row + 1;
    for quote in quotes {
        worksheet.write_string(row, 0, &quote.file_name)?;
        worksheet.write_string(row, 1, quote.kind.to_string())?;

        if let QuoteContent::Sheet(result) = &quote.quote {
            worksheet.write_string(row, 2, &result.source_language)?;
            worksheet.write_string(row, 3, result.target_languages.join(", "))?;
            worksheet.write_number_with_format(row, 5, result.weighted_count, &number_format)?;
            if let Some(source) = result.total_source {
                worksheet.write_string(row, 9, source.to_string())?;
            }
        }

        worksheet.write_number_with_format(row, 4, quote.word_count(), &number_format)?;
        // 金額が見つからないファイルは金額・単価を空欄にする
        if quote.has_amount() {
            worksheet.write_number_with_format(row, 6, quote.quote_amount(), &money_format)?;
            worksheet.write_number_with_format(row, 8, quote.unit_price(), &money_format)?;
        }
        worksheet.write_string(row, 7, quote.currency(default_currency))?;
        row += 1;
    }

    // 金額の合計は既定通貨の行のみ
    let words: f64 = quotes.iter().map(|q| q.word_count()).sum();
    let amount: f64 = quotes
        .iter()
        .filter(|q| q.currency(default_currency) == default_currency)
        .map(|q| q.quote_amount())
        .sum();
    let label = format!("Total ({})", default_currency);
    worksheet.write_string_with_format(row, 0, &label, &total_format)?;
    worksheet.write_number_with_format(row, 4, words, &total_format)?;
    worksheet.write_number_with_format(row, 6, amount, &total_format)?;
    worksheet.write_string_with_format(row, 7, default_currency, &total_format)?;

    Ok(())
}

fn write_failures(worksheet: &mut Worksheet, failures: &[BatchFailure]) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    worksheet.set_column_width(0, 28.0)?;
    worksheet.set_column_width(1, 60.0)?;
    worksheet.write_string_with_format(0, 0, "File", &header_format)?;
    worksheet.write_string_with_format(0, 1, "Error", &header_format)?;

    for (i, failure) in failures.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &failure.file_name)?;
        worksheet.write_string(row, 1, &failure.error)?;
    }

    Ok(())
}
