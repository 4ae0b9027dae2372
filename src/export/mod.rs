pub mod excel;
pub mod memory;
pub mod sheet_name;
pub mod workbook;

use crate::error::Result;
use crate::matcher::MatchResult;
use crate::scanner::base_name;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 出力行の粒度
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// ヒットしたファイルごとに1行
    #[default]
    All,
    /// 検索文字列ごとに最初のヒットのみ
    First,
}

impl std::str::FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(RowPolicy::All),
            "first" => Ok(RowPolicy::First),
            _ => Err(format!("Unknown row policy: {}. Use all or first", s)),
        }
    }
}

impl std::fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowPolicy::All => write!(f, "all"),
            RowPolicy::First => write!(f, "first"),
        }
    }
}

/// 同名シートが既に存在する場合の扱い
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetConflict {
    /// 既存シートの内容を置き換える（他のシートはそのまま）
    #[default]
    Overwrite,
    /// エラーにしてファイルを変更しない
    Reject,
    /// 既存の行を残し、末尾に追記する
    Merge,
}

impl std::str::FromStr for SheetConflict {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(SheetConflict::Overwrite),
            "reject" => Ok(SheetConflict::Reject),
            "merge" | "append" => Ok(SheetConflict::Merge),
            _ => Err(format!(
                "Unknown conflict policy: {}. Use overwrite, reject, or merge",
                s
            )),
        }
    }
}

impl std::fmt::Display for SheetConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetConflict::Overwrite => write!(f, "overwrite"),
            SheetConflict::Reject => write!(f, "reject"),
            SheetConflict::Merge => write!(f, "merge"),
        }
    }
}

/// シート書き込みの結果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetOutcome {
    /// ファイルを新規作成
    CreatedFile,
    /// 既存ファイルにシートを追加
    AddedSheet,
    /// 既存の同名シートを置き換え
    ReplacedSheet,
    /// 既存の同名シートに追記
    MergedSheet,
}

/// 出力行（検索先ファイル名, 検索文字列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub file_name: String,
    pub candidate: String,
}

/// 見出し付きの2列の表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: [String; 2],
    pub rows: Vec<[String; 2]>,
}

impl Table {
    pub fn new(headers: &[String; 2]) -> Self {
        Self {
            headers: headers.clone(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(headers: &[String; 2], rows: &[ExportRow]) -> Self {
        let mut table = Self::new(headers);
        table.rows = rows
            .iter()
            .map(|r| [r.file_name.clone(), r.candidate.clone()])
            .collect();
        table
    }
}

/// スプレッドシートへの書き込み先
pub trait SheetWriter {
    fn write_sheet(
        &mut self,
        path: &Path,
        sheet_name: &str,
        table: &Table,
        conflict: SheetConflict,
    ) -> Result<SheetOutcome>;
}

/// 照合結果を出力行に変換
///
/// ファイル列は検索先ファイルの拡張子なしファイル名。ヒットなしの検索文字列は行を出さない。
pub fn build_rows(matches: &MatchResult, policy: RowPolicy) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    for entry in matches.entries() {
        let files = match policy {
            RowPolicy::All => &entry.files[..],
            RowPolicy::First => &entry.files[..entry.files.len().min(1)],
        };

        for file in files {
            rows.push(ExportRow {
                file_name: base_name(file),
                candidate: entry.candidate.clone(),
            });
        }
    }

    rows
}

/// シート名を検証してから表を書き込む
pub fn export_table(
    writer: &mut dyn SheetWriter,
    path: &Path,
    sheet_name: &str,
    table: &Table,
    conflict: SheetConflict,
) -> Result<SheetOutcome> {
    sheet_name::validate(sheet_name)?;

    let outcome = writer.write_sheet(path, sheet_name, table, conflict)?;
    tracing::debug!(
        path = %path.display(),
        sheet = sheet_name,
        rows = table.rows.len(),
        ?outcome,
        "シートを書き込みました"
    );

    Ok(outcome)
}
