use clap::Parser;
use quote_extract::batch::{self, BatchOptions};
use quote_extract::cache::CacheFile;
use quote_extract::cli::{Cli, Commands};
use quote_extract::config::Config;
use quote_extract::{extract_file, scanner, FileQuote, QuoteContent, ReadOptions};
use quote_extract::export;
use quote_extract_common::{extract_quote_from_text, ExtractOptions, TextQuote};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "quote_extract=debug,quote_extract_common=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Extract { file, mime, sheet, currency, json } => {
            let options = read_options(&config, sheet, currency);
            let quote = extract_file(&file, mime.as_deref(), &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                print_quote(&quote);
            }
        }

        Commands::Text { input } => {
            let content = if input == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&input)?
            };
            let quote = extract_quote_from_text(&content);
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }

        Commands::Batch { folder, output, format, title, recursive, use_cache, jobs, sheet, currency } => {
            println!("📑 quote-extract - 一括抽出\n");

            println!("[1/3] 見積ファイルをスキャン中...");
            let files = scanner::scan_folder(&folder, recursive)?;
            println!("✔ {}件の見積ファイルを検出\n", files.len());

            let options = BatchOptions {
                read: read_options(&config, sheet, currency),
                use_cache: use_cache || config.use_cache,
                jobs: jobs.unwrap_or(config.jobs),
                show_progress: !cli.verbose,
            };

            println!("[2/3] 抽出中...{}", if options.use_cache { " (キャッシュ有効)" } else { "" });
            let report = batch::run_batch(&folder, &files, &options)?;
            println!(
                "✔ 抽出完了: 成功 {}件 / 失敗 {}件 / キャッシュ {}件\n",
                report.quotes.len(),
                report.failures.len(),
                report.cache_hits
            );
            for failure in &report.failures {
                println!("  ⚠ {}: {}", failure.file_name, failure.error);
            }

            println!("[3/3] レポートを出力中...");
            let output_dir = output.unwrap_or_else(|| folder.clone());
            let written = export::export_report(
                &report,
                format,
                &output_dir,
                &title,
                &options.read.extract.currency,
            )?;
            for path in written {
                println!("✔ レポート出力: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Config { set_currency, set_sheet, show } => {
            let mut config = config;

            if let Some(currency) = set_currency {
                config.set_currency(&currency)?;
                println!("✔ 既定の通貨を設定しました: {}", config.default_currency);
            }

            if let Some(index) = set_sheet {
                config.set_sheet_index(index)?;
                println!("✔ 既定のワークシート位置を設定しました: {}", index);
            }

            if show {
                println!("設定:");
                println!("  通貨: {}", config.currency());
                println!("  ワークシート位置: {}", config.sheet_index);
                println!("  キャッシュ: {}", if config.use_cache { "有効" } else { "無効" });
                println!("  並列数: {}", if config.jobs == 0 { "自動".to_string() } else { config.jobs.to_string() });
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| std::path::PathBuf::from("."));
            let cache_path = CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// 設定とコマンドライン指定から読み込みオプションを作る（指定を優先）
fn read_options(config: &Config, sheet: Option<usize>, currency: Option<String>) -> ReadOptions {
    ReadOptions {
        sheet_index: sheet.unwrap_or(config.sheet_index),
        extract: ExtractOptions {
            currency: currency
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(|| config.currency()),
        },
    }
}

fn print_quote(quote: &FileQuote) {
    println!("📄 {} ({})", quote.file_name, quote.kind);

    match &quote.quote {
        QuoteContent::Sheet(result) => {
            println!("  原文言語: {}", or_dash(&result.source_language));
            println!("  訳文言語: {}", or_dash(&result.target_languages.join(", ")));
            println!("  語数: {}", result.word_count);
            println!("  加重語数: {}", result.weighted_count);
            if result.has_amount() {
                println!("  見積金額: {:.2} {}", result.quote_amount, result.currency);
                println!("  単価: {:.4}", result.unit_price);
            } else {
                println!("  見積金額: -");
            }
            if let Some(source) = result.total_source {
                println!("  金額の検出元: {}", source);
            }
        }
        QuoteContent::Text(TextQuote { quote_amount, currency, word_count, unit_price }) => {
            let currency = currency.as_deref().unwrap_or("-");
            match quote_amount {
                Some(amount) => println!("  見積金額: {:.2} {}", amount, currency),
                None => println!("  見積金額: -"),
            }
            match word_count {
                Some(words) => println!("  語数: {}", words),
                None => println!("  語数: -"),
            }
            if let Some(price) = unit_price {
                println!("  単価: {:.4}", price);
            }
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
