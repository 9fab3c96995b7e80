pub mod batch;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod reader;
pub mod scanner;

pub use error::{QuoteError, Result};
pub use reader::{extract_file, FileKind, FileQuote, QuoteContent, ReadOptions};
