//! Quote Extract Common Library
//!
//! 見積書（スプレッドシート・テキスト）から金額・語数・言語ペアを抽出する
//! 純粋なロジック。ファイルI/Oは呼び出し側の責務。

pub mod types;
pub mod numeric;
pub mod header;
pub mod extractor;
pub mod text;

pub use types::{ExtractionResult, Sheet, TextQuote, TotalSource};
pub use extractor::{extract, extract_with, ExtractOptions, TotalStrategy};
pub use header::{find_header, ColumnMap, HeaderMatch};
pub use text::extract_quote_from_text;
