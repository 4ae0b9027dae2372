use crate::config::ConfigOverrides;
use crate::export::{RowPolicy, SheetConflict};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "name-xref")]
#[command(about = "ファイル名が別フォルダのファイル内容で参照されているかを検索し、Excelに出力", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/name-xref/config.json）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ配下のファイル名（拡張子なし）を一覧表示
    List {
        /// 対象フォルダ
        #[arg(required = true)]
        folder: PathBuf,
    },

    /// 検索元のファイル名を検索先のファイル内容から検索
    Search {
        #[command(flatten)]
        folders: FolderArgs,
    },

    /// 検索してExcelに出力
    Run {
        #[command(flatten)]
        folders: FolderArgs,

        /// 出力Excelファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// シート名テンプレート（{dest} {src} {date} を展開）
        #[arg(long)]
        sheet: Option<String>,

        /// 出力行 (all: ヒットごと / first: 最初のヒットのみ)
        #[arg(long)]
        row_policy: Option<RowPolicy>,

        /// 同名シートがある場合 (overwrite/reject/merge)
        #[arg(long)]
        on_conflict: Option<SheetConflict>,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定ファイルを書き出す
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct FolderArgs {
    /// 検索元フォルダ（ファイル名を取得する側）
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// 検索先フォルダ（ファイル内容を検索する側）
    #[arg(short, long)]
    pub destination: Option<PathBuf>,
}

impl FolderArgs {
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            source_dir: self.source,
            destination_dir: self.destination,
            ..Default::default()
        }
    }
}
