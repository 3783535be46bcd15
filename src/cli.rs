use clap::{Parser, Subcommand};
use gallery_sync_common::IndexLayout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gallery-sync")]
#[command(version, about = "画像ギャラリーのインデックスをフォルダと同期", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ギャラリーのルートフォルダ
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// 設定ファイル（省略時: ~/.config/gallery-sync/config.json）
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 新しい画像をインデックスに追加
    Update {
        /// 対象カテゴリ（省略時は全カテゴリ）
        #[arg(short, long)]
        category: Option<String>,

        /// 自動モード（簡潔な出力、警告を抑制）
        #[arg(short, long)]
        auto: bool,

        /// ドライラン（書き込みせずに結果を表示）
        #[arg(long)]
        dry_run: bool,
    },

    /// インデックスの整合性と未登録・削除済み画像を確認
    Check,

    /// インデックスを指定の書式で書き直す
    Format {
        /// 書式 (pretty/compact、省略時は設定の layout)
        #[arg(short, long)]
        layout: Option<IndexLayout>,
    },

    /// 設定を表示/編集
    Config {
        /// 画像配信ホストを設定
        #[arg(long)]
        set_host: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
