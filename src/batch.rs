//! フォルダ一括抽出
//!
//! ファイル単位で並列に抽出する（1ファイルの抽出自体は単一スレッド）。
//! 個別ファイルの失敗はバッチ全体を止めず、失敗一覧に記録する。

use crate::cache::{cache_key, compute_file_hash, CacheFile};
use crate::error::{QuoteError, Result};
use crate::reader::{extract_file, FileQuote, ReadOptions};
use crate::scanner::QuoteFile;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// 一括抽出オプション
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub read: ReadOptions,
    pub use_cache: bool,
    /// 並列数（0 = CPU数）
    pub jobs: usize,
    pub show_progress: bool,
}

/// 抽出に失敗したファイル
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub file_name: String,
    pub file_path: String,
    pub error: String,
}

/// 一括抽出の結果（入力と同じ順序）
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub quotes: Vec<FileQuote>,
    pub failures: Vec<BatchFailure>,
    pub cache_hits: usize,
}

enum Outcome {
    Cached(FileQuote),
    Extracted {
        key: Option<String>,
        file: QuoteFile,
        quote: FileQuote,
    },
    Failed(BatchFailure),
}

/// ファイル一覧を一括抽出
///
/// `folder` はキャッシュファイルの置き場所。
pub fn run_batch(folder: &Path, files: &[QuoteFile], options: &BatchOptions) -> Result<BatchReport> {
    let mut cache = if options.use_cache {
        CacheFile::load(folder)
    } else {
        CacheFile::default()
    };

    let progress = if options.show_progress {
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        ProgressBar::new(files.len() as u64).with_style(style)
    } else {
        ProgressBar::hidden()
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| QuoteError::Config(format!("スレッドプール作成エラー: {}", e)))?;

    let outcomes: Vec<Outcome> = pool.install(|| {
        files
            .par_iter()
            .map(|file| {
                let outcome = process_file(file, &cache, options);
                progress.set_message(file.file_name.clone());
                progress.inc(1);
                outcome
            })
            .collect()
    });
    progress.finish_and_clear();

    let mut report = BatchReport::default();
    let mut cache_dirty = false;

    for outcome in outcomes {
        match outcome {
            Outcome::Cached(quote) => {
                report.cache_hits += 1;
                report.quotes.push(quote);
            }
            Outcome::Extracted { key, file, quote } => {
                if let Some(key) = key {
                    cache.insert(key, file.file_name, file.size, quote.clone());
                    cache_dirty = true;
                }
                report.quotes.push(quote);
            }
            Outcome::Failed(failure) => {
                tracing::warn!(file = %failure.file_path, error = %failure.error, "抽出に失敗");
                report.failures.push(failure);
            }
        }
    }

    if options.use_cache && cache_dirty {
        cache.save(folder)?;
    }

    tracing::debug!(
        extracted = report.quotes.len(),
        failed = report.failures.len(),
        cache_hits = report.cache_hits,
        "一括抽出完了"
    );

    Ok(report)
}

fn process_file(file: &QuoteFile, cache: &CacheFile, options: &BatchOptions) -> Outcome {
    let key = if options.use_cache {
        match compute_file_hash(&file.path) {
            Ok(hash) => Some(cache_key(&hash, &options.read)),
            // ハッシュ計算失敗時は未キャッシュとして扱う
            Err(_) => None,
        }
    } else {
        None
    };

    // 同じ内容の別ファイルも同じキーになるため、ファイル名とパスは処理中のものに置き換える
    if let Some(cached) = key.as_deref().and_then(|k| cache.get(k)) {
        return Outcome::Cached(FileQuote {
            file_name: file.file_name.clone(),
            file_path: file.path.display().to_string(),
            ..cached.clone()
        });
    }

    match extract_file(&file.path, None, &options.read) {
        Ok(quote) => Outcome::Extracted {
            key,
            file: file.clone(),
            quote,
        },
        Err(e) => Outcome::Failed(BatchFailure {
            file_name: file.file_name.clone(),
            file_path: file.path.display().to_string(),
            error: e.to_string(),
        }),
    }
}
