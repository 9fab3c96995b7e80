use crate::export::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quote-extract")]
#[command(about = "翻訳見積書から金額・語数・言語ペアを抽出するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 見積ファイル（Excel/CSV/テキスト）から抽出
    Extract {
        /// 見積ファイルのパス
        #[arg(required = true)]
        file: PathBuf,

        /// MIMEタイプ（拡張子より優先）
        #[arg(long)]
        mime: Option<String>,

        /// ワークシートの位置（0始まり）
        #[arg(long)]
        sheet: Option<usize>,

        /// 通貨コード
        #[arg(long)]
        currency: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// テキストから抽出（`-` で標準入力）
    Text {
        /// テキストファイルのパス
        #[arg(required = true)]
        input: String,
    },

    /// フォルダ内の見積ファイルを一括抽出してレポート出力
    Batch {
        /// 見積フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel/both)
        #[arg(short, long, default_value = "json")]
        format: ReportFormat,

        /// レポートタイトル（ファイル名にも使用）
        #[arg(short, long, default_value = "quote-report")]
        title: String,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// キャッシュを使用（再抽出をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// 並列数（0 = CPU数）
        #[arg(short, long)]
        jobs: Option<usize>,

        /// ワークシートの位置（0始まり）
        #[arg(long)]
        sheet: Option<usize>,

        /// 通貨コード
        #[arg(long)]
        currency: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の通貨コードを設定
        #[arg(long)]
        set_currency: Option<String>,

        /// 既定のワークシート位置を設定
        #[arg(long)]
        set_sheet: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
